use core::str::FromStr;

use crate::*;

impl GameOptions {
    /// Parses a URL-style query such as `?width=16&height=16&mineCount=40`.
    ///
    /// Missing keys fall back to the defaults and unknown keys are ignored. The result is validated like
    /// [`GameOptions::try_new`].
    pub fn from_query(query: &str) -> Result<Self> {
        let mut width = Self::DEFAULT_WIDTH;
        let mut height = Self::DEFAULT_HEIGHT;
        let mut mines = Self::DEFAULT_MINES;

        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "width" => width = parse_value("width", value)?,
                "height" => height = parse_value("height", value)?,
                "mineCount" => mines = parse_value("mineCount", value)?,
                _ => log::debug!("Ignoring unknown query parameter {:?}", key),
            }
        }

        Self::try_new(width, height, mines)
    }
}

fn parse_value<T: FromStr>(name: &'static str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| GameError::InvalidOption {
        name,
        value: value.to_owned(),
    })
}
