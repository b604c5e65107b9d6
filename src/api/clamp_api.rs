// ==========================================
// Abrazaderas - clamp API
// ==========================================
// JSON facade over codec, parser and quoter.
// Commands: encode / decode / parse / quote / diameters
// Envelope: {"ok": true, "data": ...} | {"ok": false, "error": {...}}
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::QuoterConfig;
use crate::domain::clamp::{DecodedCode, EncodeRequest, EncodedCode, ParsedClampSpec};
use crate::domain::quote::{lenient_flag, lenient_text, QuoteRequest, QuoteResult};
use crate::domain::types::ClampField;
use crate::engine::clamp_code::{CatalogHints, ClampCodec};
use crate::engine::field_parse::parse_int_field;
use crate::engine::quoter::ClampQuoter;
use crate::engine::text_parser::ClampTextParser;
use crate::i18n::t_with_args;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

// ==========================================
// Request bodies
// ==========================================

/// Encode body; numbers may arrive as JSON numbers or strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeApiRequest {
    #[serde(deserialize_with = "lenient_text")]
    pub tipo: String,
    #[serde(deserialize_with = "lenient_text")]
    pub diametro: String,
    #[serde(deserialize_with = "lenient_text")]
    pub ancho: String,
    #[serde(deserialize_with = "lenient_text")]
    pub largo: String,
    #[serde(deserialize_with = "lenient_text")]
    pub forma: String,
    /// Fail on unmapped diameters instead of warning.
    #[serde(deserialize_with = "lenient_flag")]
    pub estricto: bool,
}

/// Decode body; the known sets extend the configured catalog hints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeApiRequest {
    #[serde(deserialize_with = "lenient_text")]
    pub codigo: String,
    pub anchos_conocidos: Vec<u32>,
    pub largos_conocidos: Vec<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseApiRequest {
    #[serde(deserialize_with = "lenient_text")]
    pub texto: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiametersApiRequest {
    #[serde(deserialize_with = "lenient_text")]
    pub tipo: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiametersApiResponse {
    pub tipo: String,
    pub diametros: Vec<String>,
}

fn parse_body<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    serde_json::from_str(body.trim()).map_err(|e| {
        ApiError::InvalidInput(t_with_args("api.invalid_body", &[("error", &e.to_string())]))
    })
}

/// JSON object body, or the raw text handed to `from_text`.
fn parse_body_or_text<T, F>(body: &str, from_text: F) -> ApiResult<T>
where
    T: DeserializeOwned,
    F: FnOnce(String) -> T,
{
    let trimmed = body.trim();
    if trimmed.starts_with('{') {
        parse_body(trimmed)
    } else {
        Ok(from_text(trimmed.to_string()))
    }
}

fn to_data<T: Serialize>(value: &T) -> ApiResult<Value> {
    serde_json::to_value(value).map_err(|e| ApiError::InternalError(e.to_string()))
}

// ==========================================
// ClampApi
// ==========================================
pub struct ClampApi {
    quoter: ClampQuoter,
    parser: ClampTextParser,
    hints: CatalogHints,
}

impl Default for ClampApi {
    fn default() -> Self {
        Self::new(QuoterConfig::default())
    }
}

impl ClampApi {
    pub fn new(config: QuoterConfig) -> Self {
        let hints = config.catalog_hints();
        Self {
            quoter: ClampQuoter::new(config),
            parser: ClampTextParser::new(),
            hints,
        }
    }

    pub fn config(&self) -> &QuoterConfig {
        self.quoter.config()
    }

    pub fn codec(&self) -> &ClampCodec {
        self.quoter.codec()
    }

    pub fn encode(&self, request: EncodeApiRequest) -> ApiResult<EncodedCode> {
        let width = parse_int_field(&request.ancho, ClampField::Ancho, 0)?;
        let length = parse_int_field(&request.largo, ClampField::Largo, 0)?;
        let encode_request = EncodeRequest::new(
            &request.tipo,
            &request.diametro,
            width,
            length,
            &request.forma,
        )
        .strict(request.estricto);
        Ok(self.codec().encode(&encode_request)?)
    }

    pub fn decode(&self, request: DecodeApiRequest) -> ApiResult<DecodedCode> {
        let mut hints = self.hints.clone();
        hints.known_widths.extend(request.anchos_conocidos);
        hints.known_lengths.extend(request.largos_conocidos);
        Ok(self.codec().decode(&request.codigo, &hints)?)
    }

    /// Never fails; quality is reported through confidence and warnings.
    pub fn parse_text(&self, request: ParseApiRequest) -> ParsedClampSpec {
        self.parser.parse(&request.texto)
    }

    pub fn quote(&self, request: &QuoteRequest) -> ApiResult<QuoteResult> {
        Ok(self.quoter.calculate(request)?)
    }

    pub fn allowed_diameters(&self, tipo: &str) -> Vec<String> {
        self.quoter.allowed_diameter_options(tipo)
    }

    /// Run one command over a JSON (or plain text) body and return the envelope.
    pub fn handle_json(&self, command: &str, body: &str) -> String {
        let command = command.trim().to_lowercase();
        debug!(command = %command, "api command");
        let envelope = match self.dispatch(&command, body) {
            Ok(data) => json!({ "ok": true, "data": data }),
            Err(err) => {
                warn!(command = %command, code = err.code(), error = %err, "api command failed");
                json!({ "ok": false, "error": err.to_response() })
            }
        };
        envelope.to_string()
    }

    fn dispatch(&self, command: &str, body: &str) -> ApiResult<Value> {
        match command {
            "encode" => to_data(&self.encode(parse_body(body)?)?),
            "decode" => {
                let request = parse_body_or_text(body, |codigo| DecodeApiRequest {
                    codigo,
                    ..Default::default()
                })?;
                to_data(&self.decode(request)?)
            }
            "parse" => {
                let request = parse_body_or_text(body, |texto| ParseApiRequest { texto })?;
                to_data(&self.parse_text(request))
            }
            "quote" => to_data(&self.quote(&parse_body(body)?)?),
            "diameters" => {
                let request = parse_body_or_text(body, |tipo| DiametersApiRequest { tipo })?;
                let diametros = self.allowed_diameters(&request.tipo);
                to_data(&DiametersApiResponse {
                    tipo: request.tipo,
                    diametros,
                })
            }
            other => Err(ApiError::InvalidInput(t_with_args(
                "api.unknown_command",
                &[("command", other)],
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(api: &ClampApi, command: &str, body: &str) -> Value {
        serde_json::from_str(&api.handle_json(command, body)).unwrap()
    }

    #[test]
    fn test_encode_accepts_string_numbers() {
        let api = ClampApi::default();
        let request: EncodeApiRequest = serde_json::from_str(
            r#"{"tipo": "TREFILADA", "diametro": "9/16", "ancho": "85", "largo": 270, "forma": "P"}"#,
        )
        .unwrap();
        assert_eq!(api.encode(request).unwrap().code, "ABT91685270P");
    }

    #[test]
    fn test_encode_field_errors() {
        let api = ClampApi::default();
        let value = envelope(
            &api,
            "encode",
            r#"{"tipo": "ABT", "diametro": "1/2", "ancho": "abc", "largo": 220, "forma": "P"}"#,
        );
        assert_eq!(value["ok"], false);
        assert_eq!(value["error"]["code"], "INVALID_FIELD");
        assert_eq!(value["error"]["field"], "ancho");

        let value = envelope(
            &api,
            "encode",
            r#"{"tipo": "ABT", "diametro": "1/2", "ancho": 0, "largo": 220, "forma": "P"}"#,
        );
        assert_eq!(value["error"]["field"], "ancho");
    }

    #[test]
    fn test_encode_strict_flag() {
        let api = ClampApi::default();
        let body = r#"{"tipo": "ABT", "diametro": "1 1/8", "ancho": 90, "largo": 250, "forma": "P", "estricto": true}"#;
        let value = envelope(&api, "encode", body);
        assert_eq!(value["ok"], false);
        assert_eq!(value["error"]["field"], "diametro");
    }

    #[test]
    fn test_decode_plain_text_and_json() {
        let api = ClampApi::default();
        let value = envelope(&api, "decode", "abt3480220s");
        assert_eq!(value["ok"], true);
        assert_eq!(value["data"]["diametro"], "3/4");
        assert_eq!(value["data"]["ancho"], 80);

        let value = envelope(&api, "decode", r#"{"codigo": "ABT1280220P", "anchos_conocidos": [80]}"#);
        assert_eq!(value["data"]["diametro"], "1/2");
        assert_eq!(value["data"]["ancho"], 80);
        assert_eq!(value["data"]["largo"], 220);
    }

    #[test]
    fn test_decode_errors() {
        let api = ClampApi::default();
        let value = envelope(&api, "decode", "XYZ123P");
        assert_eq!(value["error"]["code"], "INVALID_CODE");
        let value = envelope(&api, "decode", "ABT12345P");
        assert_eq!(value["error"]["code"], "SEGMENTATION_FAILED");
    }

    #[test]
    fn test_parse_command_never_fails() {
        let api = ClampApi::default();
        let value = envelope(&api, "parse", "");
        assert_eq!(value["ok"], true);
        assert_eq!(value["data"]["parse_confidence"], 30);

        let value = envelope(
            &api,
            "parse",
            r#"{"texto": "ABRAZADERA TREFILADA DE 1/2 X 80 X 220 SEMICURVA"}"#,
        );
        assert_eq!(value["data"]["parse_confidence"], 100);
        assert_eq!(value["data"]["width"], 80);
    }

    #[test]
    fn test_quote_command() {
        let api = ClampApi::default();
        let body = r#"{
            "dollar_rate": 1000, "steel_price_usd": 1,
            "supplier_discount_pct": 0, "general_increase_pct": 23,
            "clamp_type": "trefilada", "diameter": "1/2",
            "width_mm": 100, "length_mm": 200, "profile_type": "SEMICURVA"
        }"#;
        let value = envelope(&api, "quote", body);
        assert_eq!(value["ok"], true);
        assert_eq!(value["data"]["base_cost"], "622.91");
        assert_eq!(value["data"]["generated_code"], "ABT12100200S");
    }

    #[test]
    fn test_quote_command_reports_field() {
        let api = ClampApi::default();
        let body = r#"{"diameter": "1/2", "dollar_rate": "", "steel_price_usd": 1, "width_mm": 100, "length_mm": 200}"#;
        let value = envelope(&api, "quote", body);
        assert_eq!(value["error"]["field"], "dollar_rate");
    }

    #[test]
    fn test_diameters_command() {
        let api = ClampApi::default();
        let value = envelope(&api, "diameters", "laminada");
        let list: Vec<String> = serde_json::from_value(value["data"]["diametros"].clone()).unwrap();
        assert!(list.contains(&"3/4".to_string()));
        assert!(!list.contains(&"1/2".to_string()));

        let all = api.allowed_diameters("trefilada");
        assert_eq!(all.len(), api.config().weights.len());
    }

    #[test]
    fn test_unknown_command_and_bad_body() {
        let api = ClampApi::default();
        let value = envelope(&api, "explode", "{}");
        assert_eq!(value["error"]["code"], "INVALID_INPUT");
        let value = envelope(&api, "encode", "{not json");
        assert_eq!(value["error"]["code"], "INVALID_INPUT");
    }
}
