use crate::api::response::{ListResponse, WrappedDetailResponse, WrappedListResponse};
use crate::api::{endpoint, Client, Error};
use crate::model::{
    GetPowerStationListOptions, GetPowerStationOptions, PowerStation, PowerStationDetail,
};

/// Power station (plant) endpoints.
#[derive(Debug, Clone, Copy)]
pub struct PowerStationService<'a> {
    pub(crate) client: &'a Client,
}

impl<'a> PowerStationService<'a> {
    /// Read the detail of one station. `None` when the server knows no such station.
    pub async fn get(
        &self,
        opts: &GetPowerStationOptions,
    ) -> Result<Option<PowerStationDetail>, Error> {
        let request = self
            .client
            .get_request(endpoint::PLANT_DETAIL, &[("id", opts.station_id.as_str())])?;

        self.client
            .execute::<WrappedDetailResponse<PowerStationDetail>>(request)
            .await
            .map(WrappedDetailResponse::unwrap)
    }

    /// List one page of stations visible to the token.
    pub async fn list(
        &self,
        opts: &GetPowerStationListOptions,
    ) -> Result<ListResponse<PowerStation>, Error> {
        let request = self.client.post_request(endpoint::PLANT_LIST, opts)?;

        self.client
            .execute::<WrappedListResponse<PowerStation>>(request)
            .await
            .map(WrappedListResponse::unwrap)
    }
}
