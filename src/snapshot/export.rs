//! CSV export of a snapshot (`address,weight`)

use std::path::Path;

use serde::Serialize;

use super::Member;
use crate::utils::ensure_parent_dir;
use crate::utils::error::Result;

#[derive(Serialize)]
struct Row<'a> {
    address: &'a str,
    weight: String,
}

pub fn write_csv<P: AsRef<Path>>(path: P, members: &[Member]) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    for member in members {
        writer.serialize(Row { address: &member.address, weight: member.weight.to_string() })?;
    }
    writer.flush()?;
    Ok(())
}
