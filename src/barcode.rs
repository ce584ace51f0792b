//! Renders a fingerprint as a black-and-white 2-D module-grid barcode.
//! Purely presentational: the fingerprint string itself is the persisted
//! and compared artifact, the image is a scannable carrier for it.

use plotters::prelude::*;
use std::path::{Path, PathBuf};

use crate::error::{CustomError, Result};
use crate::fingerprint::{Fingerprint, PLACEHOLDER};

pub const DEFAULT_COLUMNS: usize = 8;
pub const DEFAULT_SECURITY_LEVEL: usize = 3;

// Each codeword cell: one sync module followed by 5 value bits
const CELL_MODULES: usize = 6;
const CODEWORD_SPACE: u32 = 17;
const QUIET_MODULES: usize = 4;
// Modules are stretched vertically, bar style
const MODULE_ASPECT: u32 = 3;
const MODULE_PX: u32 = 4;

/// Map fingerprint characters to codeword values and append
/// `security_level` checksum codewords. Hex digits map to their value,
/// the placeholder to 16. The checksums only detect damage; there is no
/// reconstruction.
pub fn codewords(fingerprint: &Fingerprint, security_level: usize) -> Vec<u8> {
    let mut words: Vec<u8> = fingerprint
        .as_str()
        .chars()
        .map(|ch| {
            if ch == PLACEHOLDER {
                16
            } else {
                // Fingerprints are validated on construction
                ch.to_digit(16).unwrap_or(0) as u8
            }
        })
        .collect();

    let n_data = words.len();
    for i in 0..security_level {
        let mut sum = 0u32;
        for (j, &value) in words[..n_data].iter().enumerate() {
            sum = (sum + value as u32 * ((j + i + 1) as u32 % CODEWORD_SPACE)) % CODEWORD_SPACE;
        }
        words.push(sum as u8);
    }
    words
}

/// Lay codewords out as rows of `columns` cells. Each cell is a sync
/// module followed by the 5 value bits, most significant first; cells
/// past the last codeword stay blank (sync off), so padding is
/// distinguishable from a zero codeword.
pub fn module_rows(words: &[u8], columns: usize) -> Vec<Vec<bool>> {
    let columns = columns.max(1);
    let n_rows = words.len().div_ceil(columns).max(1);
    let mut rows = Vec::with_capacity(n_rows);
    if words.is_empty() {
        rows.push(vec![false; columns * CELL_MODULES]);
        return rows;
    }
    for chunk in words.chunks(columns) {
        let mut row = vec![false; columns * CELL_MODULES];
        for (cell, &word) in chunk.iter().enumerate() {
            let base = cell * CELL_MODULES;
            row[base] = true;
            for bit in 0..5 {
                row[base + 1 + bit] = word >> (4 - bit) & 1 == 1;
            }
        }
        rows.push(row);
    }
    rows
}

/// Render the barcode PNG. Output is deterministic for a given
/// (fingerprint, columns, security_level).
pub fn render_png(
    fingerprint: &Fingerprint,
    path: &impl AsRef<Path>,
    columns: usize,
    security_level: usize,
) -> Result<()> {
    let rows = module_rows(&codewords(fingerprint, security_level), columns);
    let modules_wide = rows[0].len() + 2 * QUIET_MODULES;
    let modules_tall = rows.len() * MODULE_ASPECT as usize + 2 * QUIET_MODULES;
    let width = modules_wide as u32 * MODULE_PX;
    let height = modules_tall as u32 * MODULE_PX;

    let root = BitMapBackend::new(path.as_ref(), (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| CustomError::Render {
        source: Box::new(e),
    })?;

    for (row_idx, row) in rows.iter().enumerate() {
        let y0 = (QUIET_MODULES as u32 + row_idx as u32 * MODULE_ASPECT) * MODULE_PX;
        let y1 = y0 + MODULE_ASPECT * MODULE_PX;
        for (module_idx, &on) in row.iter().enumerate() {
            if !on {
                continue;
            }
            let x0 = (QUIET_MODULES + module_idx) as u32 * MODULE_PX;
            let x1 = x0 + MODULE_PX;
            root.draw(&Rectangle::new(
                [(x0 as i32, y0 as i32), (x1 as i32, y1 as i32)],
                BLACK.filled(),
            ))
            .map_err(|e| CustomError::Render {
                source: Box::new(e),
            })?;
        }
    }

    root.present().map_err(|e| CustomError::Render {
        source: Box::new(e),
    })
}

/// Default image placement: `<input file name>_barcode.png` next to the
/// input file.
pub fn default_image_name(vcf_path: &Path) -> String {
    let base = vcf_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "fingerprint".to_string());
    format!("{base}_barcode.png")
}

pub fn default_image_dir(vcf_path: &Path) -> PathBuf {
    vcf_path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
