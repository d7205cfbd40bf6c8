// End-to-end tests for the TTS Studio backend
//
// Each test gets its own server bound to an ephemeral port, its own temporary
// history directory and a stub speech provider in place of Google, all managed
// through test-context lifecycle hooks. Tests share nothing and run in parallel.

mod test_health;
mod test_history;
mod test_tts;
