pub mod google_tts_repository;
pub mod history_repository;
pub mod tts_repository;

pub use google_tts_repository::GoogleTtsRepository;
pub use history_repository::{DeleteOutcome, HistoryRepository};
pub use tts_repository::TtsRepository;
