// End-to-end tests for the PageToPlay Backend HTTP API
//
// Each test starts its own server on an ephemeral port, backed by an
// in-memory speech provider and a fresh temporary storage directory, so
// tests run in parallel without sharing state.

mod test_audio;
