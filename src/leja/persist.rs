// Save and load leja sequences as text
//
//   capE: <value>
//   constant: <value>
//   <re> <im>      one line per leja point in selection order
//
// Values are written with the shortest representation that parses back to
// the same double.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::info;

use super::error::{LejaError, Result};
use super::point::Point;
use super::sequence::LejaPoints;

const CAP_E_TOKEN : &str = "capE:";
const CONSTANT_TOKEN : &str = "constant:";

pub fn write<W : Write>(leja : &LejaPoints, output : &mut W) -> Result<()> {
    writeln!(output, "{} {}", CAP_E_TOKEN, leja.cap_e())?;
    writeln!(output, "{} {}", CONSTANT_TOKEN, leja.constant())?;
    for z in leja.points().iter() {
        writeln!(output, "{} {}", z.re(), z.im())?;
    }
    Ok(())
}

pub fn save(leja : &LejaPoints, path : &Path) -> Result<()> {
    let mut output = BufWriter::new(File::create(path)?);
    write(leja, &mut output)?;
    output.flush()?;
    info!("Saved {} leja points to {}", leja.points().len(), path.display());
    Ok(())
}

fn parse_f64(token : Option<&str>, line_no : usize) -> Result<f64> {
    let token = token.ok_or_else(
        || LejaError::InvalidFormat(format!("line {}: missing value", line_no))
    )?;
    token.parse::<f64>().map_err(
        |_| LejaError::InvalidFormat(format!("line {}: bad number '{}'", line_no, token))
    )
}

fn parse_header(line : Option<std::io::Result<String>>, token : &str, line_no : usize) -> Result<f64> {
    let line = line.ok_or_else(
        || LejaError::InvalidFormat(format!("missing '{}' line", token))
    )??;
    let mut parts = line.split_whitespace();
    if parts.next() != Some(token) {
        return Err(LejaError::InvalidFormat(
            format!("line {}: expected '{}'", line_no, token)
        ));
    }
    parse_f64(parts.next(), line_no)
}

pub fn read<R : BufRead>(input : R) -> Result<LejaPoints> {
    let mut lines = input.lines();
    let cap_e = parse_header(lines.next(), CAP_E_TOKEN, 1)?;
    let constant = parse_header(lines.next(), CONSTANT_TOKEN, 2)?;
    let mut points = Vec::new();
    for (i, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let line_no = i + 3;
        let mut parts = line.split_whitespace();
        let re = parse_f64(parts.next(), line_no)?;
        let im = parse_f64(parts.next(), line_no)?;
        points.push(Point::new(re, im));
    }
    LejaPoints::from_parts(points, cap_e, constant).map_err(
        |err| LejaError::InvalidFormat(err.to_string())
    )
}

pub fn load(path : &Path) -> Result<LejaPoints> {
    let leja = read(BufReader::new(File::open(path)?))?;
    info!("Loaded {} leja points from {}", leja.points().len(), path.display());
    Ok(leja)
}

#[cfg(test)]
mod tests {
    use num::complex::Complex;

    use super::*;

    fn sample() -> LejaPoints {
        LejaPoints::from_parts(
            vec![
                Point::new(0.1, -0.7),
                Point::new(1.0 / 3.0, 2.0_f64.sqrt()),
                Point::new(-1.005, 0.0)
            ],
            1.2345678901234567,
            (-0.015_f64).exp()
        ).unwrap()
    }

    #[test]
    fn test_written_format() {
        let leja = LejaPoints::from_parts(vec![Point::new(0.5, -1.0)], 2.0, 0.25).unwrap();
        let mut buf = Vec::new();
        write(&leja, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "capE: 2\nconstant: 0.25\n0.5 -1\n");
    }

    #[test]
    fn test_round_trip_evaluates_identically() {
        let leja = sample();
        let mut buf = Vec::new();
        write(&leja, &mut buf).unwrap();
        let loaded = read(buf.as_slice()).unwrap();
        assert_eq!(loaded.points(), leja.points());
        assert_eq!(loaded.cap_e(), leja.cap_e());
        assert_eq!(loaded.constant(), leja.constant());
        for z in [Complex::new(0.0, 0.0), Complex::new(0.3, -0.2), Complex::new(-2.0, 1.5)] {
            assert_eq!(loaded.polynomial().evaluate(z), leja.polynomial().evaluate(z));
        }
    }

    #[test]
    fn test_missing_cap_e_token() {
        let text = "cap: 1.0\nconstant: 0.5\n0 0\n";
        assert!(matches!(read(text.as_bytes()), Err(LejaError::InvalidFormat(_))));
    }

    #[test]
    fn test_missing_constant_token() {
        let text = "capE: 1.0\n0.5\n0 0\n";
        assert!(matches!(read(text.as_bytes()), Err(LejaError::InvalidFormat(_))));
    }

    #[test]
    fn test_malformed_header_value() {
        let text = "capE: one\nconstant: 0.5\n";
        assert!(matches!(read(text.as_bytes()), Err(LejaError::InvalidFormat(_))));
    }

    #[test]
    fn test_malformed_point() {
        let text = "capE: 1.0\nconstant: 0.5\n0.1\n";
        assert!(matches!(read(text.as_bytes()), Err(LejaError::InvalidFormat(_))));
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(read("".as_bytes()), Err(LejaError::InvalidFormat(_))));
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("leja-julia-does-not-exist.txt");
        assert!(matches!(load(&path), Err(LejaError::Io(_))));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join("leja-julia-persist-test.txt");
        let leja = sample();
        save(&leja, &path).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded.points(), leja.points());
        std::fs::remove_file(&path).unwrap();
    }
}
