use crate::api::response::{
    DataListResponse, ListResponse, WrappedDataListResponse, WrappedDetailResponse,
    WrappedListResponse,
};
use crate::api::{endpoint, Client, Error};
use crate::model::{
    GetInverterHistoryDataOptions, GetInverterListOptions, GetInverterOptions,
    GetInverterProductionReportOptions, GetInverterRealtimeDataOptions, Inverter, InverterDetail,
    InverterHistoryTimeData, InverterRealTimeData, ProductionReport,
};

/// Inverter (device) endpoints.
#[derive(Debug, Clone, Copy)]
pub struct InverterService<'a> {
    pub(crate) client: &'a Client,
}

impl<'a> InverterService<'a> {
    pub async fn list(&self, opts: &GetInverterListOptions) -> Result<ListResponse<Inverter>, Error> {
        let request = self.client.post_request(endpoint::DEVICE_LIST, opts)?;

        self.client
            .execute::<WrappedListResponse<Inverter>>(request)
            .await
            .map(WrappedListResponse::unwrap)
    }

    /// Read the detail of one inverter. `None` when the server knows no such serial number.
    pub async fn get(&self, opts: &GetInverterOptions) -> Result<Option<InverterDetail>, Error> {
        let request = self
            .client
            .get_request(endpoint::DEVICE_DETAIL, &[("sn", opts.inverter_sn.as_str())])?;

        self.client
            .execute::<WrappedDetailResponse<InverterDetail>>(request)
            .await
            .map(WrappedDetailResponse::unwrap)
    }

    /// Latest value of each requested variable.
    pub async fn realtime_data(
        &self,
        opts: &GetInverterRealtimeDataOptions,
    ) -> Result<DataListResponse<InverterRealTimeData>, Error> {
        let request = self.client.post_request(endpoint::DEVICE_REAL_QUERY, opts)?;

        self.client
            .execute::<WrappedDataListResponse<InverterRealTimeData>>(request)
            .await
            .map(WrappedDataListResponse::unwrap)
    }

    /// Time series of each requested variable between `begin` and `end`.
    pub async fn history_data(
        &self,
        opts: &GetInverterHistoryDataOptions,
    ) -> Result<DataListResponse<InverterHistoryTimeData>, Error> {
        let request = self
            .client
            .post_request(endpoint::DEVICE_HISTORY_QUERY, opts)?;

        self.client
            .execute::<WrappedDataListResponse<InverterHistoryTimeData>>(request)
            .await
            .map(WrappedDataListResponse::unwrap)
    }

    pub async fn production_report(
        &self,
        opts: &GetInverterProductionReportOptions,
    ) -> Result<DataListResponse<ProductionReport>, Error> {
        let request = self
            .client
            .post_request(endpoint::DEVICE_REPORT_QUERY, opts)?;

        self.client
            .execute::<WrappedDataListResponse<ProductionReport>>(request)
            .await
            .map(WrappedDataListResponse::unwrap)
    }
}
