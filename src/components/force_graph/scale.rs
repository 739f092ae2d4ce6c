//! Visual encoding of derived statistics.
//!
//! # Scales
//!
//! - [`RadiusScale`]: square-root scale from node degree to pixel radius, so
//!   circle *area* grows linearly with the number of collaborations.
//! - [`CountryColors`]: ordinal scale from country to palette color. Only the
//!   top-ranked countries get a palette entry; the rest share one fallback.
//!
//! Both scales are built once from [`GraphStats`] and are read-only afterwards.

use std::collections::HashMap;

use super::stats::GraphStats;
use super::theme::{Color, CountryPalette};

/// Square-root scale mapping a degree domain onto a radius range.
#[derive(Clone, Debug, PartialEq)]
pub struct RadiusScale {
	domain: (f64, f64),
	range: (f64, f64),
}

impl RadiusScale {
	pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
		Self { domain, range }
	}

	/// Build the scale over the degree extent of `stats`.
	/// An empty graph gets a zero-width domain.
	pub fn from_stats(stats: &GraphStats, range: (f64, f64)) -> Self {
		let (min, max) = stats.degree_extent().unwrap_or((0, 0));
		Self::new((min as f64, max as f64), range)
	}

	/// Midpoint of the output range, used when the domain is degenerate.
	pub fn midpoint(&self) -> f64 {
		(self.range.0 + self.range.1) / 2.0
	}

	pub fn is_degenerate(&self) -> bool {
		let (lo, hi) = (self.domain.0.max(0.0).sqrt(), self.domain.1.max(0.0).sqrt());
		(hi - lo).abs() < f64::EPSILON
	}

	pub fn apply(&self, degree: f64) -> f64 {
		if self.is_degenerate() {
			return self.midpoint();
		}
		let (lo, hi) = (self.domain.0.max(0.0).sqrt(), self.domain.1.max(0.0).sqrt());
		let t = (degree.max(0.0).sqrt() - lo) / (hi - lo);
		self.range.0 + t * (self.range.1 - self.range.0)
	}
}

/// Ordinal scale from country name to color.
#[derive(Clone, Debug)]
pub struct CountryColors {
	assigned: HashMap<String, Color>,
	ranked: Vec<(String, Color)>,
	fallback: Color,
}

impl CountryColors {
	/// Assign palette colors to `stats.top_countries` in rank order.
	/// Countries beyond the palette length fall back as well.
	pub fn from_stats(stats: &GraphStats, palette: &CountryPalette) -> Self {
		let ranked: Vec<(String, Color)> = stats
			.top_countries
			.iter()
			.enumerate()
			.filter_map(|(rank, country)| palette.get(rank).map(|c| (country.clone(), c)))
			.collect();
		let assigned = ranked.iter().cloned().collect();
		Self {
			assigned,
			ranked,
			fallback: palette.fallback,
		}
	}

	pub fn color(&self, country: &str) -> Color {
		self.assigned.get(country).copied().unwrap_or(self.fallback)
	}

	pub fn is_highlighted(&self, country: &str) -> bool {
		self.assigned.contains_key(country)
	}

	/// Highlighted countries with their colors, in rank order.
	pub fn ranked(&self) -> &[(String, Color)] {
		&self.ranked
	}

	pub fn fallback(&self) -> Color {
		self.fallback
	}
}
