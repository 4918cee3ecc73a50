//! Root water extraction shape parameters
//!
//! Derives the maximum water extraction at the top and bottom of the
//! root zone from the crop's quantile inputs, following the AquaCrop
//! redistribution of the extraction profile when the two quantiles
//! diverge.

/// Top/bottom extraction terms from their quantile inputs
#[must_use]
pub fn extraction_terms(sx_top_q: f64, sx_bot_q: f64) -> (f64, f64) {
    if sx_top_q == sx_bot_q {
        return (sx_top_q, sx_bot_q);
    }

    // Order so s1 carries the larger quantile
    let (s1, s2) = if sx_top_q < sx_bot_q {
        (sx_bot_q, sx_top_q)
    } else {
        (sx_top_q, sx_bot_q)
    };

    let xx = 3.0 * (s2 / s1);
    let (ss1, ss2) = if xx < 0.5 {
        ((4.0 / 3.5) * s1, 0.0)
    } else {
        ((xx + 3.5) * (s1 / 4.5), ((xx - 0.5) / 3.5) * s2)
    };

    if sx_top_q > sx_bot_q {
        (ss1, ss2)
    } else {
        (ss2, ss1)
    }
}
