//! Symbol table: interns token strings into dense integer ids

use super::rbtree::{NodeId, StringMap};
use crate::error::{IndexError, Result};
use crate::utils::{ChunkedVec, DEFAULT_CHUNK, read_line_bytes, split_lines};
use memmap2::Mmap;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Dense identifier of an interned token
pub type SymbolId = u32;

/// Id of the empty string, used as the sentence-boundary marker
pub const BOUNDARY: SymbolId = 0;

/// Extension of the symbol file next to an index base path
pub const SYMBOLS_EXT: &str = "symbols";

/// Bidirectional string <-> id mapping
///
/// Texts are stored once, in the nodes of the ordered map; the reverse array
/// holds node handles indexed by id.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    name_to_number: StringMap<SymbolId>,
    number_to_node: ChunkedVec<NodeId>,
}

impl SymbolTable {
    /// Create a table holding only the boundary symbol
    pub fn new() -> Result<Self> {
        Self::with_chunk(DEFAULT_CHUNK)
    }

    /// Create a table whose arrays grow by `chunk` entries
    pub fn with_chunk(chunk: usize) -> Result<Self> {
        let mut table = Self {
            name_to_number: StringMap::with_chunk(chunk),
            number_to_node: ChunkedVec::new(chunk),
        };
        table.reset()?;
        Ok(table)
    }

    /// Drop every symbol except the boundary
    pub fn reset(&mut self) -> Result<()> {
        self.name_to_number.clear();
        self.number_to_node.clear();
        self.intern(b"")?;
        Ok(())
    }

    /// Get the id of `text`, assigning the next free id on first sight
    pub fn intern(&mut self, text: &[u8]) -> Result<SymbolId> {
        let next = SymbolId::try_from(self.number_to_node.len())
            .map_err(|_| IndexError::allocation::<NodeId>(self.number_to_node.len() + 1))?;
        let inserted = self.name_to_number.insert_or_get(text, next)?;
        if inserted.was_new {
            self.number_to_node.push(inserted.node)?;
        }
        Ok(inserted.value)
    }

    /// Text of a symbol id
    ///
    /// Panics if `id` was not produced by this table.
    #[inline]
    pub fn text_of(&self, id: SymbolId) -> &[u8] {
        self.name_to_number.key(self.number_to_node[id as usize])
    }

    /// Checked variant of [`text_of`](Self::text_of)
    pub fn get(&self, id: SymbolId) -> Option<&[u8]> {
        self.number_to_node
            .get(id as usize)
            .map(|&node| self.name_to_number.key(node))
    }

    /// Id of `text` if it has been interned
    pub fn id_of(&self, text: &[u8]) -> Option<SymbolId> {
        self.name_to_number.get(text)
    }

    /// Number of symbols, boundary included
    pub fn len(&self) -> usize {
        self.number_to_node.len()
    }

    /// Always false: the boundary symbol is present from construction
    pub fn is_empty(&self) -> bool {
        self.number_to_node.is_empty()
    }

    /// Symbols in id order
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &[u8])> + '_ {
        self.number_to_node
            .iter()
            .enumerate()
            .map(|(id, &node)| (id as SymbolId, self.name_to_number.key(node)))
    }

    /// Symbols in byte-string order
    pub fn iter_sorted(&self) -> impl Iterator<Item = (SymbolId, &[u8])> + '_ {
        self.name_to_number.iter().map(|(text, id)| (id, text))
    }

    /// Write every symbol in id order, one per line
    pub fn save<W: Write>(&self, writer: &mut W) -> Result<()> {
        for (_, text) in self.iter() {
            writer.write_all(text)?;
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Intern every line of `reader` in order
    pub fn load<R: BufRead>(&mut self, reader: &mut R) -> Result<()> {
        let mut line = Vec::new();
        while read_line_bytes(reader, &mut line)? {
            self.intern(&line)?;
        }
        Ok(())
    }

    /// Write `<base>.symbols`
    pub fn save_to_path(&self, base: &Path) -> Result<()> {
        let path = symbols_path(base);
        let file = File::create(&path).map_err(|e| IndexError::io(&path, e))?;
        let mut writer = BufWriter::with_capacity(65536, file);
        self.save(&mut writer)
            .and_then(|()| writer.flush().map_err(IndexError::from))
            .map_err(|e| with_path(e, &path))
    }

    /// Intern every line of `<base>.symbols`
    pub fn load_from_path(&mut self, base: &Path) -> Result<()> {
        let path = symbols_path(base);
        let file = File::open(&path).map_err(|e| IndexError::io(&path, e))?;
        let len = file.metadata().map_err(|e| IndexError::io(&path, e))?.len();
        if len == 0 {
            return Ok(());
        }
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| IndexError::io(&path, e))?;
        for line in split_lines(&mmap) {
            self.intern(line)?;
        }
        Ok(())
    }
}

/// Path of the symbol file for an index base path
pub fn symbols_path(base: &Path) -> PathBuf {
    with_extension(base, SYMBOLS_EXT)
}

/// Append `.ext` to a base path without replacing any existing extension
pub(crate) fn with_extension(base: &Path, ext: &str) -> PathBuf {
    let mut os = base.as_os_str().to_os_string();
    os.push(".");
    os.push(ext);
    PathBuf::from(os)
}

/// Attach a path to a bare stream error
pub(crate) fn with_path(err: IndexError, path: &Path) -> IndexError {
    match err {
        IndexError::Stream(source) => IndexError::io(path, source),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn test_boundary_is_preinterned() {
        let table = SymbolTable::new().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.text_of(BOUNDARY), b"");
        assert_eq!(table.id_of(b""), Some(BOUNDARY));
    }

    #[test]
    fn test_ids_in_first_seen_order() {
        let mut table = SymbolTable::new().unwrap();
        let ids: Vec<SymbolId> = ["the", "cat", "sat", "the", "dog"]
            .iter()
            .map(|w| table.intern(w.as_bytes()).unwrap())
            .collect();

        assert_eq!(ids, vec![1, 2, 3, 1, 4]);
        assert_eq!(table.len(), 5);
        assert_eq!(table.text_of(3), b"sat");
        assert_eq!(table.intern(b"").unwrap(), BOUNDARY);
    }

    #[test]
    fn test_get_out_of_range() {
        let table = SymbolTable::new().unwrap();
        assert_eq!(table.get(0), Some(&b""[..]));
        assert_eq!(table.get(1), None);
    }

    #[test]
    fn test_iter_sorted() {
        let mut table = SymbolTable::new().unwrap();
        for w in ["zebra", "apple", "mango"] {
            table.intern(w.as_bytes()).unwrap();
        }
        let sorted: Vec<(SymbolId, &[u8])> = table.iter_sorted().collect();
        assert_eq!(
            sorted,
            vec![(0, &b""[..]), (2, &b"apple"[..]), (3, &b"mango"[..]), (1, &b"zebra"[..])]
        );
    }

    #[test]
    fn test_save_format() {
        let mut table = SymbolTable::new().unwrap();
        table.intern(b"hello").unwrap();
        table.intern(b"world").unwrap();

        let mut out = Vec::new();
        table.save(&mut out).unwrap();
        assert_eq!(out, b"\nhello\nworld\n");
    }

    #[test]
    fn test_save_load_roundtrip_in_memory() {
        let mut table = SymbolTable::new().unwrap();
        for w in ["b", "a", "\u{e9}t\u{e9}", "c"] {
            table.intern(w.as_bytes()).unwrap();
        }
        table.intern(b"raw\xfe").unwrap();

        let mut out = Vec::new();
        table.save(&mut out).unwrap();

        let mut loaded = SymbolTable::new().unwrap();
        loaded.load(&mut Cursor::new(out)).unwrap();

        let original: Vec<_> = table.iter().collect();
        let reloaded: Vec<_> = loaded.iter().collect();
        assert_eq!(original, reloaded);
    }

    #[test]
    fn test_save_load_path() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("corpus.en");

        let mut table = SymbolTable::new().unwrap();
        table.intern(b"one").unwrap();
        table.intern(b"two").unwrap();
        table.save_to_path(&base).unwrap();

        assert!(dir.path().join("corpus.en.symbols").exists());

        let mut loaded = SymbolTable::new().unwrap();
        loaded.load_from_path(&base).unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.id_of(b"two"), Some(2));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let mut table = SymbolTable::new().unwrap();
        let err = table.load_from_path(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, IndexError::Io { .. }));
    }

    #[test]
    fn test_reset() {
        let mut table = SymbolTable::with_chunk(2).unwrap();
        for w in ["a", "b", "c", "d"] {
            table.intern(w.as_bytes()).unwrap();
        }
        table.reset().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.id_of(b"a"), None);
    }

    proptest! {
        #[test]
        fn prop_interning_is_idempotent_and_dense(words in prop::collection::vec("[a-z]{1,4}", 0..200)) {
            let mut table = SymbolTable::with_chunk(8).unwrap();
            let first: Vec<SymbolId> = words.iter().map(|w| table.intern(w.as_bytes()).unwrap()).collect();
            let second: Vec<SymbolId> = words.iter().map(|w| table.intern(w.as_bytes()).unwrap()).collect();
            prop_assert_eq!(&first, &second);

            let mut distinct = words.clone();
            distinct.sort();
            distinct.dedup();
            prop_assert_eq!(table.len(), distinct.len() + 1);

            let mut used: Vec<SymbolId> = first.clone();
            used.push(BOUNDARY);
            used.sort_unstable();
            used.dedup();
            prop_assert_eq!(used, (0..table.len() as SymbolId).collect::<Vec<_>>());

            for (word, id) in words.iter().zip(&first) {
                prop_assert_eq!(table.text_of(*id), word.as_bytes());
            }
        }
    }
}
