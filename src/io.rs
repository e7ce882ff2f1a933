//! File adapters around the miner: transaction input, threshold argument and
//! TSV rule output.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{AprioriError, Result};
use crate::rules::{Rule, RuleSink};
use crate::transactions::TransactionStore;

pub fn read_transactions(path: &Path) -> Result<TransactionStore> {
    let file = File::open(path).map_err(|e| AprioriError::io(path, e))?;
    TransactionStore::from_reader(BufReader::new(file))
}

/// Parses the minimum support percentage. Anything but a non-negative integer
/// is rejected.
pub fn parse_min_support(raw: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| AprioriError::InvalidArgument {
            name: "min_support",
            value: raw.to_string(),
        })
}

/// Writes one rule per line in tab separated form.
pub struct TsvRuleWriter<W: Write> {
    out: W,
    written: usize,
}

impl<W: Write> TsvRuleWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    /// Flushes and hands back the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

impl TsvRuleWriter<BufWriter<File>> {
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|e| AprioriError::io(path, e))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> RuleSink for TsvRuleWriter<W> {
    fn emit(&mut self, rule: &Rule) -> Result<()> {
        writeln!(self.out, "{}", rule)?;
        self.written += 1;
        Ok(())
    }
}
