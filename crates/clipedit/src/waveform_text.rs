//! Text rendering of the waveform overview
//!
//! Draws each peak as a vertical bar in a character grid, the terminal
//! equivalent of stroking one line per canvas column.

use clipedit_core::waveform::Peak;

const BAR: char = '#';
const CENTER: char = '-';
const EMPTY: char = ' ';

/// Render peaks into `rows` lines of text, one character per peak
pub fn render(peaks: &[Peak], rows: usize) -> Vec<String> {
    if rows == 0 || peaks.is_empty() {
        return Vec::new();
    }

    let height = rows as f32;
    let center_row = rows / 2;
    let mut grid = vec![vec![EMPTY; peaks.len()]; rows];

    for (col, peak) in peaks.iter().enumerate() {
        grid[center_row][col] = CENTER;

        // (y for min, y for max): max is the upper end of the bar
        let (y_min, y_max) = peak.to_pixels(height);
        let top = (y_max.floor().max(0.0) as usize).min(rows - 1);
        let bottom = (y_min.ceil().max(0.0) as usize).min(rows).max(top + 1);
        for row in grid.iter_mut().take(bottom).skip(top) {
            row[col] = BAR;
        }
    }

    grid.into_iter().map(|row| row.into_iter().collect()).collect()
}
