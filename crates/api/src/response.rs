//! JSON envelope types shared by the handlers.
//!
//! Success payloads travel inside `{ "data": ... }`. Question lists also
//! carry a `count` field so clients driving a progress indicator do not have
//! to measure the array themselves.

use serde::Serialize;

/// `{ "data": T }` envelope for a single payload.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": [...], "count": N }` envelope for question lists.
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub data: Vec<T>,
    pub count: usize,
}

impl<T: Serialize> ListResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        let count = data.len();
        Self { data, count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_envelope_shape() {
        let json = serde_json::to_value(DataResponse { data: 7 }).unwrap();
        assert_eq!(json, serde_json::json!({ "data": 7 }));
    }

    #[test]
    fn test_list_envelope_counts_its_items() {
        let json = serde_json::to_value(ListResponse::new(vec!["a", "b", "c"])).unwrap();
        assert_eq!(json["count"], 3);
        assert_eq!(json["data"].as_array().unwrap().len(), 3);
    }
}
