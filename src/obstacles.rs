use std::io::BufRead;
use std::path::Path;

use crate::error::{LbmError, Result};

/// Read the blocked cells list: one `x y 1` triple per line.
pub fn read_obstacles<R: BufRead>(reader: R, nx: usize, ny: usize) -> Result<Vec<(usize, usize)>> {
    let mut obstacles = Vec::new();

    for (i_line, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = i_line + 1;
        let fail = |reason: String| LbmError::ObstacleLine {
            line: line_no,
            reason,
        };

        if line.trim().is_empty() {
            continue;
        }

        let values = line
            .split_whitespace()
            .map(|token| token.parse::<i64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| fail("expected 3 integers per line".to_owned()))?;

        let (x, y, blocked) = match values[..] {
            [x, y, blocked] => (x, y, blocked),
            _ => return Err(fail(format!("expected 3 values per line, got {}", values.len()))),
        };

        if x < 0 || x >= nx as i64 {
            return Err(fail(format!("obstacle x-coord {} out of range [0, {})", x, nx)));
        }
        if y < 0 || y >= ny as i64 {
            return Err(fail(format!("obstacle y-coord {} out of range [0, {})", y, ny)));
        }
        if blocked != 1 {
            return Err(fail(format!("obstacle blocked value should be 1, got {}", blocked)));
        }

        obstacles.push((x as usize, y as usize));
    }

    Ok(obstacles)
}

pub fn load_obstacles<P: AsRef<Path>>(path: P, nx: usize, ny: usize) -> Result<Vec<(usize, usize)>> {
    let file = std::fs::File::open(path)?;
    read_obstacles(std::io::BufReader::new(file), nx, ny)
}
