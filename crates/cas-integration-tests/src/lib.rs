//! Intentionally empty. The suite lives in `tests/`.
