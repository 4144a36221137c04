use std::path::Path;
use std::str::FromStr;

use crate::error::{LbmError, Result};
use crate::Float;

/// Run configuration, read once from the parameter file.
///
/// The file holds seven whitespace separated values in this order:
/// `nx ny max_iters reynolds_dim density accel omega`.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Params {
    /// cells in x-direction
    pub nx: usize,
    /// cells in y-direction
    pub ny: usize,
    pub max_iters: usize,
    /// length scale for the Reynolds number
    pub reynolds_dim: usize,
    /// density per link
    pub density: Float,
    /// density redistributed by the inlet forcing
    pub accel: Float,
    /// relaxation parameter
    pub omega: Float,
}

impl Params {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        std::fs::read_to_string(path)?.parse()
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |name, value: String, reason| {
            Err(LbmError::InvalidParam {
                name,
                value,
                reason,
            })
        };

        if self.nx == 0 {
            return invalid("nx", self.nx.to_string(), "must be at least 1");
        }
        // the inlet row is ny - 2
        if self.ny < 2 {
            return invalid("ny", self.ny.to_string(), "must be at least 2");
        }
        if !(self.density.is_finite() && self.density > 0.) {
            return invalid("density", self.density.to_string(), "must be positive");
        }
        if !(self.accel.is_finite() && self.accel >= 0.) {
            return invalid("accel", self.accel.to_string(), "must be non-negative");
        }
        if !(self.omega > 0. && self.omega < 2.) {
            return invalid("omega", self.omega.to_string(), "must lie in (0, 2)");
        }
        Ok(())
    }
}

fn next_value<'a, T, I>(tokens: &mut I, name: &'static str) -> Result<T>
where
    T: FromStr,
    I: Iterator<Item = &'a str>,
{
    let token = tokens.next().ok_or(LbmError::MissingParam(name))?;
    token.parse().map_err(|_| LbmError::InvalidParam {
        name,
        value: token.to_owned(),
        reason: "not a number of the expected type",
    })
}

impl FromStr for Params {
    type Err = LbmError;

    fn from_str(s: &str) -> Result<Self> {
        let mut tokens = s.split_whitespace();

        let params = Params {
            nx: next_value(&mut tokens, "nx")?,
            ny: next_value(&mut tokens, "ny")?,
            max_iters: next_value(&mut tokens, "maxIters")?,
            reynolds_dim: next_value(&mut tokens, "reynolds_dim")?,
            density: next_value(&mut tokens, "density")?,
            accel: next_value(&mut tokens, "accel")?,
            omega: next_value(&mut tokens, "omega")?,
        };
        params.validate()?;
        Ok(params)
    }
}
