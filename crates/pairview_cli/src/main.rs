//! Command-line driver for the PairView core.
//!
//! # Responsibility
//! - Exercise the state model against a local database: manage groups,
//!   import images, select A/B slots, inspect the snapshot.

use pairview_core::{
    Action, BinaryResolver, ComparisonSession, DirectoryImport, FileAcquisition, Slot, Snapshot,
    SqliteSnapshotStore,
};
use std::path::PathBuf;

const USAGE: &str = "\
usage: pairview [--db PATH] COMMAND

commands:
  groups                        list groups (* marks the active one)
  create NAME...                create a group and make it active
  rename GROUP_ID NAME...       rename a group
  delete GROUP_ID               delete a group and its images
  use GROUP_ID                  switch the active group
  images [GROUP_ID]             list images (active group by default)
  import GROUP_ID DIR           import image files from a directory
  remove IMAGE_ID               remove one image
  set GROUP_ID a|b [IMAGE_ID]   fill or clear a comparison slot
  export IMAGE_ID OUT_PATH      write an image's bytes to a file
  show                          dump the snapshot as JSON";

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(message) = run(args) {
        eprintln!("error: {message}");
        std::process::exit(1);
    }
}

fn run(mut args: Vec<String>) -> Result<(), String> {
    let db_path = match take_db_flag(&mut args)? {
        Some(path) => PathBuf::from(path),
        None => default_db_path()?,
    };
    if args.is_empty() {
        println!("{USAGE}");
        return Ok(());
    }

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|err| format!("cannot create data directory: {err}"))?;
        // Best-effort: the CLI stays usable without a log file.
        let _ = pairview_core::init_logging(
            pairview_core::default_log_level(),
            parent.join("logs"),
        );
    }

    let store = SqliteSnapshotStore::open(&db_path)
        .map_err(|err| format!("cannot open store at `{}`: {err}", db_path.display()))?;
    let mut session = ComparisonSession::open(store);

    let command = args.remove(0);
    match command.as_str() {
        "groups" => list_groups(session.snapshot()),
        "create" => {
            require(&args, 1, "create NAME...")?;
            session.dispatch(Action::CreateGroup {
                name: Some(args.join(" ")),
                now_ms: None,
            });
            list_groups(session.snapshot());
        }
        "rename" => {
            require(&args, 2, "rename GROUP_ID NAME...")?;
            let group_id = args.remove(0);
            let changed = session.dispatch(Action::RenameGroup {
                group_id,
                name: args.join(" "),
            });
            report(changed);
        }
        "delete" => {
            require(&args, 1, "delete GROUP_ID")?;
            let changed = session.dispatch(Action::DeleteGroup {
                group_id: args.remove(0),
            });
            report(changed);
        }
        "use" => {
            require(&args, 1, "use GROUP_ID")?;
            let changed = session.dispatch(Action::SetActiveGroup {
                group_id: Some(args.remove(0)),
            });
            report(changed);
        }
        "images" => {
            let snapshot = session.snapshot();
            let group_id = match args.first() {
                Some(id) => id.clone(),
                None => snapshot
                    .active_group_id
                    .clone()
                    .ok_or_else(|| "no active group".to_string())?,
            };
            list_images(snapshot, &group_id)?;
        }
        "import" => {
            require(&args, 2, "import GROUP_ID DIR")?;
            let group_id = args.remove(0);
            let dir = args.remove(0);
            let entries = DirectoryImport::new(dir, session.store()).acquire(&group_id);
            let prepared = entries.len();
            let before = session.snapshot().images.len();
            session.dispatch(Action::AddImages { group_id, entries });
            let added = session.snapshot().images.len() - before;
            println!("prepared {prepared} file(s), added {added} image(s)");
        }
        "remove" => {
            require(&args, 1, "remove IMAGE_ID")?;
            let changed = session.dispatch(Action::RemoveImage {
                image_id: args.remove(0),
            });
            report(changed);
        }
        "set" => {
            require(&args, 2, "set GROUP_ID a|b [IMAGE_ID]")?;
            let group_id = args.remove(0);
            let slot = parse_slot(&args.remove(0))?;
            let image_id = if args.is_empty() {
                None
            } else {
                Some(args.remove(0))
            };
            let changed = session.dispatch(Action::SetImageSlot {
                group_id,
                slot,
                image_id,
            });
            report(changed);
        }
        "export" => {
            require(&args, 2, "export IMAGE_ID OUT_PATH")?;
            let image_id = args.remove(0);
            let out_path = args.remove(0);
            let image = session
                .snapshot()
                .image(&image_id)
                .ok_or_else(|| format!("unknown image `{image_id}`"))?;
            let bytes = session
                .store()
                .resolve(&image.handle_key)
                .ok_or_else(|| format!("no stored bytes for `{}`", image.file_name))?;
            std::fs::write(&out_path, bytes)
                .map_err(|err| format!("cannot write `{out_path}`: {err}"))?;
            println!("wrote {out_path}");
        }
        "show" => {
            let json = serde_json_pretty(session.snapshot())?;
            println!("{json}");
        }
        other => return Err(format!("unknown command `{other}`\n{USAGE}")),
    }
    Ok(())
}

fn list_groups(snapshot: &Snapshot) {
    for group in snapshot.groups_by_display_order() {
        let marker = if snapshot.active_group_id.as_deref() == Some(group.id.as_str()) {
            "*"
        } else {
            " "
        };
        println!("{marker} {}  {}", group.id, group.name);
    }
}

fn list_images(snapshot: &Snapshot, group_id: &str) -> Result<(), String> {
    if snapshot.group(group_id).is_none() {
        return Err(format!("unknown group `{group_id}`"));
    }
    let comparison = snapshot.comparison(group_id);
    for image in snapshot.images_in_group(group_id) {
        let slot = comparison
            .map(|comparison| {
                if comparison.image_a_id.as_deref() == Some(image.id.as_str()) {
                    "[A]"
                } else if comparison.image_b_id.as_deref() == Some(image.id.as_str()) {
                    "[B]"
                } else {
                    "   "
                }
            })
            .unwrap_or("   ");
        println!("{slot} {}  {}", image.id, image.file_name);
    }
    Ok(())
}

fn parse_slot(value: &str) -> Result<Slot, String> {
    match value.to_ascii_lowercase().as_str() {
        "a" => Ok(Slot::A),
        "b" => Ok(Slot::B),
        other => Err(format!("expected slot `a` or `b`, got `{other}`")),
    }
}

fn report(changed: bool) {
    if !changed {
        println!("no change");
    }
}

fn require(args: &[String], count: usize, usage: &str) -> Result<(), String> {
    if args.len() < count {
        return Err(format!("usage: pairview {usage}"));
    }
    Ok(())
}

fn take_db_flag(args: &mut Vec<String>) -> Result<Option<String>, String> {
    let Some(position) = args.iter().position(|arg| arg == "--db") else {
        return Ok(None);
    };
    if position + 1 >= args.len() {
        return Err("--db requires a path".to_string());
    }
    args.remove(position);
    Ok(Some(args.remove(position)))
}

fn default_db_path() -> Result<PathBuf, String> {
    let mut path = dirs::data_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| "cannot determine user data directory".to_string())?;
    path.push("pairview");
    path.push("pairview.db");
    Ok(path)
}

fn serde_json_pretty(snapshot: &Snapshot) -> Result<String, String> {
    serde_json::to_string_pretty(snapshot).map_err(|err| err.to_string())
}
