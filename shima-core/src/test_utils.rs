//! Shared test utilities for `shima-core`.

use proptest::test_runner::Config as ProptestConfig;
use shima_test_support::ci::property_test_profile::ProptestRunProfile;

use crate::raster::RasterView;

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `SHIMA_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Number of times determinism properties relabel one raster.
#[must_use]
pub(crate) fn repeat_runs() -> u32 {
    ProptestRunProfile::load(1, false).repeat_runs()
}

/// Wraps a known-good buffer, panicking with context otherwise.
#[must_use]
pub(crate) fn view(cells: &[u8], width: usize, height: usize) -> RasterView<'_> {
    RasterView::try_new(cells, width, height)
        .unwrap_or_else(|error| panic!("{width}x{height} test raster is invalid: {error}"))
}
