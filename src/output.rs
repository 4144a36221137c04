use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::lbm::diagnostics::CellState;
use crate::Float;

pub const FINAL_STATE_FILE: &str = "final_state.dat";
pub const AV_VELS_FILE: &str = "av_vels.dat";

/// `value` with 12 decimals and an exponent of at least two digits, e.g.
/// `1.000000000000E-01`.
pub fn format_sci(value: Float) -> String {
    let formatted = format!("{:.12E}", value);
    match formatted.split_once('E') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}E{}{:0>2}", mantissa, sign, digits)
        }
        // inf and NaN carry no exponent
        None => formatted,
    }
}

pub fn write_final_state<W: Write>(mut out: W, states: &[CellState]) -> Result<()> {
    for state in states {
        writeln!(
            out,
            "{} {} {} {} {} {} {}",
            state.x,
            state.y,
            format_sci(state.ux),
            format_sci(state.uy),
            format_sci(state.speed),
            format_sci(state.pressure),
            state.blocked as u8
        )?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_av_vels<W: Write>(mut out: W, av_vels: &[Float]) -> Result<()> {
    for (tt, av_vel) in av_vels.iter().enumerate() {
        writeln!(out, "{}:\t{}", tt, format_sci(*av_vel))?;
    }
    out.flush()?;
    Ok(())
}

pub fn save_final_state<P: AsRef<Path>>(path: P, states: &[CellState]) -> Result<()> {
    write_final_state(BufWriter::new(File::create(path)?), states)
}

pub fn save_av_vels<P: AsRef<Path>>(path: P, av_vels: &[Float]) -> Result<()> {
    write_av_vels(BufWriter::new(File::create(path)?), av_vels)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_format_sci() {
        assert_eq!(format_sci(0.1), "1.000000000000E-01");
        assert_eq!(format_sci(0.), "0.000000000000E+00");
        assert_eq!(format_sci(-2.5e-7), "-2.500000000000E-07");
        assert_eq!(format_sci(12345.), "1.234500000000E+04");
        assert_eq!(format_sci(1e100), "1.000000000000E+100");
        assert_eq!(format_sci(Float::INFINITY), "inf");
    }

    #[test]
    fn test_write_av_vels() {
        let mut out = Vec::new();

        write_av_vels(&mut out, &[0.5, 0.25]).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "0:\t5.000000000000E-01\n1:\t2.500000000000E-01\n"
        );
    }

    #[test]
    fn test_write_final_state() {
        let states = [
            CellState {
                x: 0,
                y: 0,
                ux: 0.001,
                uy: -0.002,
                speed: 0.5,
                pressure: 0.1,
                blocked: false,
            },
            CellState {
                x: 1,
                y: 0,
                ux: 0.,
                uy: 0.,
                speed: 0.,
                pressure: 0.2,
                blocked: true,
            },
        ];
        let mut out = Vec::new();

        write_final_state(&mut out, &states).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines[0],
            "0 0 1.000000000000E-03 -2.000000000000E-03 5.000000000000E-01 1.000000000000E-01 0"
        );
        assert_eq!(
            lines[1],
            "1 0 0.000000000000E+00 0.000000000000E+00 0.000000000000E+00 2.000000000000E-01 1"
        );
    }
}
