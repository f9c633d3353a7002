mod fixtures;

use fixtures::reference_test;

// Tolerance: 1e-6. Gains and losses are plain sums over the trailing
// change window, recomputed per bar.
reference_test!(
    rsi_14_close,
    Rsi,
    RsiConfig::close(nz(14)),
    "tests/fixtures/data/rsi-14-close.csv",
    1e-6
);
