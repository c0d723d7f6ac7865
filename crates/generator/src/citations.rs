//! Citation aging
//!
//! Citations follow an exponential draw whose mean is
//! `citation_rate * (current_year - year + 1)`, so older papers accumulate more.

use rand::Rng;

/// Age of a publication in years, counting the publication year itself
pub fn age(year: i32, current_year: i32) -> u32 {
    (current_year - year + 1).max(1) as u32
}

/// Expected citation count for a publication of the given year
pub fn expected_citations(year: i32, current_year: i32, citation_rate: f64) -> f64 {
    citation_rate * f64::from(age(year, current_year))
}

/// Draw a citation count by inverse-transform sampling of an exponential
pub fn draw_citations<R: Rng + ?Sized>(
    year: i32,
    current_year: i32,
    citation_rate: f64,
    rng: &mut R,
) -> u32 {
    let mean = expected_citations(year, current_year, citation_rate);
    let u: f64 = rng.gen();
    let draw = -(1.0 - u).ln() * mean;
    // float-to-int casts saturate, and the draw is never negative
    draw.floor() as u32
}
