mod fixtures;

use fixtures::reference_test;

// Tolerance: 1e-6. The recurrence is identical to the reference
// implementation, differences stay within rounding.
reference_test!(
    ema_12_close,
    Ema,
    EmaConfig::close(nz(12)),
    "tests/fixtures/data/ema-12-close.csv",
    1e-6
);
