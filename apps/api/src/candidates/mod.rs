// Candidate intake: upload → text → profile → archive + persist, and scoring
// of stored candidates against job descriptions.

pub mod handlers;
pub mod store;
