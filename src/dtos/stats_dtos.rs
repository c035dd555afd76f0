use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CountOut {
    pub count: u64,
}

#[derive(Debug, Serialize)]
pub struct AverageOut {
    pub average: f64,
}
