// Candidate-to-job matching. Scoring only reads a parsed profile and the JD text.

pub mod scorer;
