// Intentionally empty: this package only carries integration tests.
