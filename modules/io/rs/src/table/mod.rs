use std::io::BufReader;
use std::path::Path;

use depthit_core_rs::loc::ReadInterval;
use depthit_engine_rs::DepthProfile;
use eyre::{Context, Result};

pub use reader::{parse, ReadTable, Reader};
pub use writer::{WriteTable, Writer};

mod reader;
mod writer;

/// Read every `start,length` row from a read-interval table.
pub fn read_intervals(path: impl AsRef<Path>) -> Result<Vec<ReadInterval<u64>>> {
    let path = path.as_ref();
    let mut reader = Reader::new(BufReader::new(crate::compression::read_file(path)?.box_read()));

    let mut records = Vec::new();
    reader
        .read_to_end(&mut records)
        .wrap_err_with(|| format!("Failed to read intervals from {}", path.display()))?;

    log::debug!("Read {} intervals from {}", records.len(), path.display());
    Ok(records)
}

/// Read every `position` row from a locus table. Columns past the first are
/// ignored, so position/coverage exports can be fed back in as loci.
pub fn read_loci(path: impl AsRef<Path>) -> Result<Vec<u64>> {
    let path = path.as_ref();
    let mut reader = Reader::new(BufReader::new(crate::compression::read_file(path)?.box_read()));

    let mut records = Vec::new();
    reader
        .read_to_end(&mut records)
        .wrap_err_with(|| format!("Failed to read loci from {}", path.display()))?;

    log::debug!("Read {} loci from {}", records.len(), path.display());
    Ok(records)
}

/// Write read intervals as a `start,length` table.
pub fn write_intervals(path: impl AsRef<Path>, intervals: &[ReadInterval<u64>]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = Writer::<_, ReadInterval<u64>>::new(crate::compression::create_file(path)?)
        .wrap_err_with(|| format!("Failed to write intervals to {}", path.display()))?;
    writer.write_records(intervals)?;
    writer.flush()?;

    log::debug!("Wrote {} intervals to {}", intervals.len(), path.display());
    Ok(())
}

/// Write the whole depth track as a `position,coverage` table, one row per
/// position from 0 to the end of the computed span.
pub fn write_depths(path: impl AsRef<Path>, profile: &DepthProfile) -> Result<()> {
    let path = path.as_ref();
    let mut writer = Writer::<_, (u64, u32)>::new(crate::compression::create_file(path)?)
        .wrap_err_with(|| format!("Failed to write depths to {}", path.display()))?;
    for (position, depth) in profile.iter().enumerate() {
        writer.write_record(&(position as u64, depth))?;
    }
    writer.flush()?;

    log::debug!("Wrote {} depth rows to {}", profile.len(), path.display());
    Ok(())
}

/// Write resolved loci as a `position,coverage` table, in the given order.
pub fn write_loci_depths(path: impl AsRef<Path>, depths: &[(u64, u32)]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = Writer::<_, (u64, u32)>::new(crate::compression::create_file(path)?)
        .wrap_err_with(|| format!("Failed to write loci depths to {}", path.display()))?;
    writer.write_records(depths)?;
    writer.flush()?;

    log::debug!("Wrote {} loci depth rows to {}", depths.len(), path.display());
    Ok(())
}
