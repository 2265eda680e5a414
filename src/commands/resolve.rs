use anyhow::Result;
use winnerforce_core::reference::{Reference, resolve};
use winnerforce_core::{ResolvedRef, Snapshot};

use crate::RecordKind;
use crate::commands::print_json;
use crate::render::Render;

pub fn run(snapshot: &Snapshot, kind: RecordKind, id: &str, json: bool) -> Result<()> {
    let resolved = resolve_record(snapshot, kind, id)?;

    if json {
        return print_json(&resolved);
    }

    println!("{}", resolved.render());
    Ok(())
}

fn resolve_record(snapshot: &Snapshot, kind: RecordKind, id: &str) -> Result<ResolvedRef> {
    let resolved = match kind {
        RecordKind::Goal => resolve(Some(&Reference::Id(id.to_string())), &snapshot.goals),
        RecordKind::Campaign => resolve(Some(&Reference::Id(id.to_string())), &snapshot.campaigns),
    };

    resolved.ok_or_else(|| anyhow::anyhow!("Nothing to resolve for '{}'", id))
}
