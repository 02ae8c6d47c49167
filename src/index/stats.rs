use crate::index::suffix_array::{IndexMeta, SuffixIndex};
use crate::symbols::BOUNDARY;
use std::io::{self, Write};
use std::ops::Range;

/// Display index statistics
pub fn write_stats<W: Write>(out: &mut W, meta: &IndexMeta) -> io::Result<()> {
    writeln!(out, "Index Statistics")?;
    writeln!(out, "================")?;
    writeln!(out)?;
    writeln!(out, "Tokens:           {}", meta.token_count)?;
    writeln!(out, "Symbols:          {}", meta.symbol_count)?;
    writeln!(out, "Boundaries:       {}", meta.boundary_count)?;
    writeln!(out, "Sorted:           {}", if meta.sorted { "yes" } else { "no" })?;
    Ok(())
}

/// Print suffix array entries for debugging
///
/// One line per entry in `range`: the corpus position, then the next
/// `width` tokens. Boundaries print as `#` and positions past the end of
/// the corpus as `*`.
pub fn dump_suffixes<W: Write>(
    out: &mut W,
    index: &SuffixIndex,
    width: usize,
    range: Range<usize>,
) -> io::Result<()> {
    let corpus = index.corpus();
    let suffixes = index.suffixes();
    let end = range.end.min(suffixes.len());

    for &pos in suffixes.get(range.start..end).unwrap_or_default() {
        write!(out, "{:4}:", pos)?;
        let start = pos as usize;
        for i in start..start.saturating_add(width) {
            out.write_all(b" ")?;
            match corpus.get(i) {
                Some(&BOUNDARY) => out.write_all(b"#")?,
                Some(&id) => out.write_all(index.symbols().text_of(id))?,
                None => out.write_all(b"*")?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}
