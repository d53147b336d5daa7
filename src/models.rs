use serde::{Deserialize, Serialize};

/// One traffic/payment entry for a single gate lane. Field names on the
/// wire follow the backend's capitalised Indonesian convention.
#[derive(Clone, PartialEq, Deserialize, Serialize)]
pub struct LalinRecord {
    pub id: Option<i64>,
    #[serde(rename = "IdCabang")]
    pub id_cabang: u32,
    #[serde(rename = "IdGerbang")]
    pub id_gerbang: u32,
    #[serde(rename = "IdGardu", default)]
    pub id_gardu: u32,
    #[serde(rename = "Tanggal")]
    pub tanggal: String,
    #[serde(rename = "Golongan")]
    pub golongan: u32,
    #[serde(rename = "Tunai")]
    pub tunai: i64,
    #[serde(rename = "eMandiri")]
    pub e_mandiri: i64,
    #[serde(rename = "eBri")]
    pub e_bri: i64,
    #[serde(rename = "eBni")]
    pub e_bni: i64,
    #[serde(rename = "eBca")]
    pub e_bca: i64,
    #[serde(rename = "eFlo")]
    pub e_flo: i64,
}

impl LalinRecord {
    /// Sum over the five electronic payment channels.
    pub fn e_toll_total(&self) -> i64 {
        self.e_mandiri + self.e_bri + self.e_bni + self.e_bca + self.e_flo
    }

    /// Overall total: cash plus every electronic channel. Computed on
    /// demand, never stored alongside the record.
    pub fn total(&self) -> i64 {
        self.tunai + self.e_toll_total()
    }
}

/// A toll gate, referenced by `LalinRecord::id_gerbang`.
#[derive(Clone, PartialEq, Deserialize, Serialize)]
pub struct Gerbang {
    pub id: u32,
    #[serde(rename = "IdCabang")]
    pub id_cabang: u32,
    #[serde(rename = "NamaGerbang")]
    pub nama_gerbang: String,
    #[serde(rename = "NamaCabang", default)]
    pub nama_cabang: String,
}

// The backend wraps every list payload twice: an outer page envelope
// under `data`, then the row set under `rows.rows`.

#[derive(Clone, PartialEq, Deserialize, Serialize)]
pub struct LalinResponse {
    pub status: bool,
    #[serde(default)]
    pub message: String,
    pub data: Page<LalinRecord>,
}

impl LalinResponse {
    pub fn records(&self) -> &[LalinRecord] {
        &self.data.rows.rows
    }
}

#[derive(Clone, PartialEq, Deserialize, Serialize)]
pub struct GerbangResponse {
    pub status: bool,
    #[serde(default)]
    pub message: String,
    pub data: Page<Gerbang>,
}

impl GerbangResponse {
    pub fn gates(&self) -> &[Gerbang] {
        &self.data.rows.rows
    }
}

#[derive(Clone, PartialEq, Deserialize, Serialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: u64,
    pub rows: RowSet<T>,
}

#[derive(Clone, PartialEq, Deserialize, Serialize)]
pub struct RowSet<T> {
    pub rows: Vec<T>,
}

#[derive(Clone, PartialEq, Deserialize, Serialize)]
pub struct LoginResponse {
    pub status: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(tunai: i64, channels: [i64; 5]) -> LalinRecord {
        LalinRecord {
            id: None,
            id_cabang: 1,
            id_gerbang: 1,
            id_gardu: 1,
            tanggal: "2023-11-01".to_string(),
            golongan: 1,
            tunai,
            e_mandiri: channels[0],
            e_bri: channels[1],
            e_bni: channels[2],
            e_bca: channels[3],
            e_flo: channels[4],
        }
    }

    #[test]
    fn total_is_cash_plus_all_channels() {
        let rec = record(100, [10, 0, 0, 0, 0]);
        assert_eq!(rec.e_toll_total(), 10);
        assert_eq!(rec.total(), 110);
    }

    #[test]
    fn total_covers_every_channel() {
        let rec = record(7, [1, 2, 3, 4, 5]);
        assert_eq!(rec.e_toll_total(), 15);
        assert_eq!(rec.total(), 22);
    }

    #[test]
    fn lalin_response_unwraps_nested_rows() {
        let body = serde_json::json!({
            "status": true,
            "message": "ok",
            "data": {
                "count": 1,
                "rows": {
                    "rows": [{
                        "id": 3,
                        "IdCabang": 14,
                        "IdGerbang": 2,
                        "IdGardu": 1,
                        "Tanggal": "2023-11-01 06:15:00",
                        "Golongan": 1,
                        "Tunai": 100,
                        "eMandiri": 10,
                        "eBri": 0,
                        "eBni": 0,
                        "eBca": 0,
                        "eFlo": 0
                    }]
                }
            }
        });

        let resp: LalinResponse = serde_json::from_value(body).unwrap();
        assert_eq!(resp.records().len(), 1);
        assert_eq!(resp.records()[0].id_gerbang, 2);
        assert_eq!(resp.records()[0].total(), 110);
    }

    #[test]
    fn login_response_token_is_optional() {
        let ok: LoginResponse =
            serde_json::from_str(r#"{"status":true,"message":"ok","token":"abc"}"#).unwrap();
        assert_eq!(ok.token.as_deref(), Some("abc"));

        let denied: LoginResponse =
            serde_json::from_str(r#"{"status":false,"message":"wrong password"}"#).unwrap();
        assert!(denied.token.is_none());
    }
}
