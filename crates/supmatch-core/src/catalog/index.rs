//! Leading-word index over a flattened catalog.
//!
//! The flattened catalog holds `id,name` lines grouped so that every name
//! sharing a leading word is contiguous. The offset map records, per leading
//! word, the byte offset of that group's first line, and is persisted as a
//! JSON object next to the flattened file.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use super::parse_supplier_line;
use super::reader::CatalogReader;
use crate::error::{IndexError, ParseError, Result};
use crate::models::{IndexConfig, Supplier};

/// Counters reported after building an index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Catalog entries written.
    pub entries: usize,
    /// Distinct leading words.
    pub groups: usize,
    /// Size of the flattened catalog in bytes.
    pub bytes: u64,
}

/// Leading word -> byte offset of its group in the flattened catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogIndex {
    offsets: HashMap<String, u64>,
}

impl CatalogIndex {
    /// Group `suppliers` by leading word and write the groups to `flattened`.
    ///
    /// Groups are written in order of first appearance; entries within a
    /// group keep catalog order. Fails on the first unreadable entry or on a
    /// name without words.
    pub fn build<I, W>(suppliers: I, flattened: &mut W) -> Result<(Self, IndexStats)>
    where
        I: IntoIterator<Item = Result<Supplier>>,
        W: Write,
    {
        let mut groups: Vec<(String, Vec<Supplier>)> = Vec::new();
        let mut slots: HashMap<String, usize> = HashMap::new();
        let mut entries = 0;

        for supplier in suppliers {
            let supplier = supplier?;
            let Some(leading) = supplier.leading_word() else {
                return Err(ParseError::EmptyName { id: supplier.id }.into());
            };
            let slot = match slots.get(leading) {
                Some(&slot) => slot,
                None => {
                    let leading = leading.to_string();
                    groups.push((leading.clone(), Vec::new()));
                    slots.insert(leading, groups.len() - 1);
                    groups.len() - 1
                }
            };
            groups[slot].1.push(supplier);
            entries += 1;
        }

        let mut offsets = HashMap::with_capacity(groups.len());
        let mut offset = 0u64;
        for (leading, suppliers) in &groups {
            offsets.insert(leading.clone(), offset);
            for supplier in suppliers {
                let line = supplier.to_line();
                flattened.write_all(line.as_bytes())?;
                offset += line.len() as u64;
            }
        }
        flattened.flush()?;

        let stats = IndexStats {
            entries,
            groups: groups.len(),
            bytes: offset,
        };
        Ok((Self { offsets }, stats))
    }

    /// Build the flattened catalog and offset map for the catalog at `catalog`.
    pub fn build_files(catalog: &Path, config: &IndexConfig) -> Result<IndexStats> {
        let reader = CatalogReader::open(catalog)?;

        let flattened_path = config.flattened_path(catalog);
        let mut flattened = BufWriter::new(File::create(&flattened_path)?);
        let (index, stats) = Self::build(reader, &mut flattened)?;

        let offsets_path = config.offsets_path(catalog);
        index.save(&offsets_path)?;

        info!(
            "Indexed {} suppliers into {} groups ({} bytes) at {}",
            stats.entries,
            stats.groups,
            stats.bytes,
            flattened_path.display()
        );
        Ok(stats)
    }

    /// Load a persisted offset map.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let offsets: HashMap<String, u64> =
            serde_json::from_reader(BufReader::new(file)).map_err(IndexError::from)?;
        debug!("Loaded {} index keys from {}", offsets.len(), path.display());
        Ok(Self { offsets })
    }

    /// Persist the offset map as JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer(&mut writer, &self.offsets).map_err(IndexError::from)?;
        writer.flush()?;
        Ok(())
    }

    /// Offset of the group whose leading word is `word`.
    pub fn lookup(&self, word: &str) -> Option<u64> {
        self.offsets.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// Seekable reader over a flattened catalog.
pub struct FlattenedCatalog<R> {
    reader: BufReader<R>,
    line: String,
}

impl FlattenedCatalog<File> {
    /// Open a flattened catalog file.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: Read + Seek> FlattenedCatalog<R> {
    pub fn new(inner: R) -> Self {
        Self {
            reader: BufReader::new(inner),
            line: String::new(),
        }
    }

    /// Read the single entry starting at `offset`.
    pub fn read_entry_at(&mut self, offset: u64) -> Result<Supplier> {
        self.reader.seek(SeekFrom::Start(offset))?;
        self.next_entry(offset)?
            .ok_or_else(|| IndexError::UnexpectedEof { offset }.into())
    }

    /// Read the contiguous run of entries starting at `offset` whose leading word is `word`.
    pub fn read_group_at(&mut self, offset: u64, word: &str) -> Result<Vec<Supplier>> {
        self.reader.seek(SeekFrom::Start(offset))?;

        let mut group = Vec::new();
        let mut position = offset;
        while let Some(supplier) = self.next_entry(position)? {
            position += self.line.len() as u64;
            if supplier.leading_word() != Some(word) {
                break;
            }
            group.push(supplier);
        }

        if group.is_empty() {
            return Err(IndexError::GroupMismatch {
                offset,
                word: word.to_string(),
            }
            .into());
        }
        Ok(group)
    }

    /// Parse the line under the cursor; `None` at end of file.
    fn next_entry(&mut self, offset: u64) -> Result<Option<Supplier>> {
        self.line.clear();
        if self.reader.read_line(&mut self.line)? == 0 {
            return Ok(None);
        }
        match parse_supplier_line(&self.line) {
            Some(supplier) => Ok(Some(supplier)),
            None => Err(IndexError::InvalidEntry {
                offset,
                content: self.line.trim_end().to_string(),
            }
            .into()),
        }
    }
}
