use crate::api::Error;
use num_derive::FromPrimitive;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Known `errno` values of the response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum ErrNo {
    NoError = 0,
    HeadersMissing = 40256,
    BodyInvalid = 40257,
    RequestsTooFrequent = 40400,
    RateLimitExceeded = 40402,
    TokenExpired = 41808,
    TokenInvalid = 41809,
}

/* {"errno":0,"msg":"success","result":{...}} or {"errno":40402,"msg":"..."} */
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope {
    #[serde(default)]
    pub errno: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub result: Value,
}

impl Envelope {
    /// Map a non-zero `errno` to its error, carry `result` forward otherwise.
    pub fn into_result(self) -> Result<Value, Error> {
        let message = self.msg.unwrap_or_default();

        match num::FromPrimitive::from_i64(self.errno) {
            Some(ErrNo::NoError) => Ok(self.result),
            Some(ErrNo::TokenExpired) | Some(ErrNo::TokenInvalid) => {
                Err(Error::InvalidToken(message))
            }
            Some(ErrNo::HeadersMissing) => Err(Error::MissingHeaders(message)),
            Some(ErrNo::BodyInvalid) => Err(Error::InvalidBody(message)),
            Some(ErrNo::RequestsTooFrequent) => Err(Error::TooManyRequests(message)),
            Some(ErrNo::RateLimitExceeded) => Err(Error::RateLimitExceeded(message)),
            None => Err(Error::ApiError {
                code: self.errno,
                message,
            }),
        }
    }
}

/// Decode the `result` of a successful envelope into one of the wrapped shapes below.
pub(crate) fn decode_result<T: DeserializeOwned>(result: Value) -> Result<T, Error> {
    serde_json::from_value(result).map_err(Error::UnexpectedApiResponse)
}

/// One page of a paginated listing, counters as reported by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub page_size: u32,
    pub total: u64,
}

/// Items of a bare-array result, in server order.
#[derive(Debug, Clone, PartialEq)]
pub struct DataListResponse<T> {
    pub items: Vec<T>,
}

/* result: {"data":[...],"currentPage":1,"pageSize":10,"total":1} */
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Page<T> {
    data: Option<Vec<T>>,
    #[serde(default)]
    current_page: u32,
    #[serde(default)]
    page_size: u32,
    #[serde(default)]
    total: u64,
}

/* null or missing result is an empty page with zero counters */
#[derive(Deserialize)]
#[serde(transparent)]
pub(crate) struct WrappedListResponse<T> {
    result: Option<Page<T>>,
}

impl<T> WrappedListResponse<T> {
    pub fn unwrap(self) -> ListResponse<T> {
        match self.result {
            Some(page) => ListResponse {
                items: page.data.unwrap_or_default(),
                current_page: page.current_page,
                page_size: page.page_size,
                total: page.total,
            },
            None => ListResponse {
                items: Vec::new(),
                current_page: 0,
                page_size: 0,
                total: 0,
            },
        }
    }
}

/* result: [...] */
#[derive(Deserialize)]
#[serde(transparent)]
pub(crate) struct WrappedDataListResponse<T> {
    result: Option<Vec<T>>,
}

impl<T> WrappedDataListResponse<T> {
    pub fn unwrap(self) -> DataListResponse<T> {
        DataListResponse {
            items: self.result.unwrap_or_default(),
        }
    }
}

/* result: {...}, null when the station or device is unknown */
#[derive(Deserialize)]
#[serde(transparent)]
pub(crate) struct WrappedDetailResponse<T> {
    result: Option<T>,
}

impl<T> WrappedDetailResponse<T> {
    pub fn unwrap(self) -> Option<T> {
        self.result
    }
}
