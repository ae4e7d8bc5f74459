//! Per-position draw options.
//!
//! Every position of a drawing collection has a draw option string such as
//! `"SAME"`, `"SAME LP"`, `"HIST"` or `"COLZ"`. The table is addressed by the
//! element's position plus an option offset (the ratio collection of a
//! dual-pad layout continues after the main collection).

use crate::diagnostics::Diagnostics;
use crate::plottable::PlotKind;

/// Option given to every position unless configured otherwise.
pub const DEFAULT_OPTION: &str = "SAME";

/// Overlay token removed from point-set options.
pub const OVERLAY_TOKEN: &str = "SAME";

/// Table of draw options indexed by position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawOptions {
    options: Vec<String>,
}

impl DrawOptions {
    /// Table of `len` copies of `option`.
    pub fn filled(len: usize, option: &str) -> Self {
        Self {
            options: vec![option.to_string(); len],
        }
    }

    /// Number of positions in the table.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Whether the table has no positions.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Option at `position`, `None` past the end.
    pub fn get(&self, position: usize) -> Option<&str> {
        self.options.get(position).map(String::as_str)
    }

    /// All options in position order.
    pub fn as_slice(&self) -> &[String] {
        &self.options
    }

    /// Give every position the same option, keeping the table size.
    pub fn set_all(&mut self, option: &str) {
        let len = self.options.len();
        self.options = vec![option.to_string(); len];
    }

    /// Replace the whole table. Legends and other annotations occupy
    /// positions too and must be included.
    pub fn set_options(&mut self, options: Vec<String>) {
        self.options = options;
    }

    /// Set the option at `position`. Out-of-range positions are reported and
    /// leave the table unchanged.
    pub fn set_option(&mut self, option: &str, position: usize, diag: &mut Diagnostics) -> bool {
        match self.options.get_mut(position) {
            Some(slot) => {
                *slot = option.to_string();
                true
            }
            None => {
                diag.error(format!(
                    "Set Options: position {position} is out of range ({} options)",
                    self.options.len()
                ));
                false
            }
        }
    }

    /// Set options for a few positions at once.
    ///
    /// `options` holds one option per line, `positions` whitespace separated
    /// positions; `offset` is added to every position. Pairing stops at the
    /// shorter of the two lists.
    pub fn set_options_at(
        &mut self,
        options: &str,
        positions: &str,
        offset: usize,
        diag: &mut Diagnostics,
    ) {
        let lines = options.lines().map(str::trim).filter(|l| !l.is_empty());
        for (option, position) in lines.zip(positions.split_whitespace()) {
            match position.parse::<usize>() {
                Ok(pos) => {
                    tracing::debug!(option, position = pos + offset, "set draw option");
                    self.set_option(option, pos + offset, diag);
                }
                Err(_) => diag.error(format!("Set Options: '{position}' is not a position")),
            }
        }
    }

    /// Grow the table with default options up to `len` entries.
    pub fn ensure_len(&mut self, len: usize) {
        if self.options.len() < len {
            self.options.resize(len, DEFAULT_OPTION.to_string());
        }
    }

    /// Option for `position`, normalized for `kind`.
    ///
    /// Point-set kinds lose their overlay token: forcing overlay mode on the
    /// first point-set of a pad would suppress its axes. Positions past the
    /// table fall back to [`DEFAULT_OPTION`].
    pub fn resolve(&self, position: usize, kind: PlotKind, diag: &mut Diagnostics) -> String {
        let option = match self.get(position) {
            Some(option) => option,
            None => {
                diag.warn(format!(
                    "No draw option for position {position}, using {DEFAULT_OPTION}"
                ));
                DEFAULT_OPTION
            }
        };
        normalize_option(option, kind)
    }
}

/// Strip the overlay token from point-set options; other kinds pass through.
pub fn normalize_option(option: &str, kind: PlotKind) -> String {
    if kind.is_graph_like() {
        strip_overlay(option)
    } else {
        option.to_string()
    }
}

/// Remove every overlay token and collapse the remaining whitespace.
pub fn strip_overlay(option: &str) -> String {
    option
        .replace(OVERLAY_TOKEN, "")
        .replace("same", "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parsed form of a draw option string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawFlags {
    /// Overlay onto what the pad already shows
    pub same: bool,
    /// Step outline for distributions
    pub hist: bool,
    /// Color map for 2-D distributions
    pub colz: bool,
    /// Polyline through the points
    pub line: bool,
    /// Markers at the points
    pub markers: bool,
    /// Error bars
    pub errors: bool,
    /// Smooth curve, drawn as a polyline
    pub smooth: bool,
    /// Draw the axes of a fresh frame
    pub axes: bool,
}

impl DrawFlags {
    /// Parse an option string, case-insensitively.
    pub fn parse(option: &str) -> Self {
        let mut upper = option.to_uppercase();
        let mut flags = DrawFlags::default();

        for (word, flag) in [("SAME", 0), ("COLZ", 1), ("HIST", 2)] {
            if upper.contains(word) {
                match flag {
                    0 => flags.same = true,
                    1 => flags.colz = true,
                    _ => flags.hist = true,
                }
                upper = upper.replace(word, " ");
            }
        }

        for c in upper.chars() {
            match c {
                'L' => flags.line = true,
                'P' => flags.markers = true,
                'E' => flags.errors = true,
                'C' => flags.smooth = true,
                'A' => flags.axes = true,
                _ => {}
            }
        }
        flags
    }

    /// Whether no drawing style letter was given.
    pub const fn is_plain(&self) -> bool {
        !(self.hist || self.colz || self.line || self.markers || self.errors || self.smooth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_sets_lose_overlay_token() {
        assert_eq!(normalize_option("SAME LP", PlotKind::Graph), "LP");
        assert_eq!(normalize_option("PSAME", PlotKind::MultiGraph), "P");
        assert_eq!(normalize_option("SAME LP", PlotKind::Hist1D), "SAME LP");
        assert_eq!(normalize_option("SAME", PlotKind::Line), "SAME");
    }

    #[test]
    fn test_set_option_out_of_range_keeps_table() {
        let mut diag = Diagnostics::new();
        let mut options = DrawOptions::filled(2, DEFAULT_OPTION);

        assert!(options.set_option("HIST", 1, &mut diag));
        assert!(!options.set_option("P", 5, &mut diag));

        assert_eq!(options.as_slice(), &["SAME".to_string(), "HIST".to_string()]);
        assert_eq!(diag.len(), 1);
        assert!(diag.contains("position 5 is out of range"));
    }

    #[test]
    fn test_set_all_keeps_size() {
        let mut options = DrawOptions::filled(3, DEFAULT_OPTION);
        options.set_all("SAME HIST");
        assert_eq!(options.len(), 3);
        assert!(options.as_slice().iter().all(|o| o == "SAME HIST"));
    }

    #[test]
    fn test_set_options_at_with_offset() {
        let mut diag = Diagnostics::new();
        let mut options = DrawOptions::filled(5, DEFAULT_OPTION);

        options.set_options_at("SAME HIST\nSAME P\nE1", "0 2", 2, &mut diag);

        assert_eq!(options.get(2), Some("SAME HIST"));
        assert_eq!(options.get(4), Some("SAME P"));
        assert_eq!(options.get(0), Some("SAME"));
        assert!(diag.is_empty());
    }

    #[test]
    fn test_resolve_past_table_falls_back() {
        let mut diag = Diagnostics::new();
        let options = DrawOptions::filled(1, "HIST");
        assert_eq!(options.resolve(0, PlotKind::Hist1D, &mut diag), "HIST");
        assert_eq!(options.resolve(3, PlotKind::Hist1D, &mut diag), DEFAULT_OPTION);
        assert_eq!(options.resolve(3, PlotKind::Graph, &mut diag), "");
        assert_eq!(diag.len(), 2);
    }

    #[test]
    fn test_ensure_len_pads_with_default() {
        let mut options = DrawOptions::filled(1, "HIST");
        options.ensure_len(3);
        options.ensure_len(2);
        assert_eq!(options.len(), 3);
        assert_eq!(options.get(2), Some(DEFAULT_OPTION));
    }

    #[test]
    fn test_parse_flags() {
        let flags = DrawFlags::parse("same lp");
        assert!(flags.same && flags.line && flags.markers);
        assert!(!flags.errors);

        let flags = DrawFlags::parse("COLZ");
        assert!(flags.colz && !flags.smooth && !flags.line);

        let flags = DrawFlags::parse("SAME HIST");
        assert!(flags.hist && !flags.markers);

        assert!(DrawFlags::parse("SAME").is_plain());
        assert!(DrawFlags::parse("E1").errors);
    }
}
