//! Sequential scan over a fixed-size record file.

use std::fs::File;
use std::io::BufReader;
use std::marker::PhantomData;
use std::path::Path;

use crate::error::Result;
use crate::record::{read_block, FixedRecord};

/// Iterator over every complete record in a file, with its byte offset
///
/// A trailing partial record ends the scan without an error.
pub struct RecordScan<T> {
    reader: BufReader<File>,
    offset: u64,
    block: Vec<u8>,
    done: bool,
    _record: PhantomData<T>,
}

impl<T: FixedRecord> RecordScan<T> {
    /// Open `path` and position at the first record
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            reader: BufReader::new(file),
            offset: 0,
            block: vec![0u8; T::SIZE],
            done: false,
            _record: PhantomData,
        })
    }

    /// Offset just past the last complete record read so far
    pub fn end_offset(&self) -> u64 {
        self.offset
    }
}

impl<T: FixedRecord> Iterator for RecordScan<T> {
    type Item = Result<(u64, T)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match read_block(&mut self.reader, &mut self.block) {
            Ok(true) => {
                let offset = self.offset;
                self.offset += T::SIZE as u64;
                Some(T::decode(&self.block).map(|record| (offset, record)))
            }
            Ok(false) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e.into()))
            }
        }
    }
}
