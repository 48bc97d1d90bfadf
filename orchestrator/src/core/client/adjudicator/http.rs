use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

use super::{
    AdjudicatorClient, AdjudicatorError, ApplicationStatusResponse, SubmissionOutcome, SubmitApplicationRequest,
};
use crate::types::constant::ADJUDICATOR_STATUS_QUERY_PARAM;
use crate::types::params::AdjudicatorArgs;

/// Adjudicator client speaking JSON over HTTP
pub struct HttpAdjudicatorClient {
    client: Client,
    create_url: Url,
    status_url: Url,
}

impl HttpAdjudicatorClient {
    pub fn new(args: &AdjudicatorArgs) -> Result<Self, AdjudicatorError> {
        let mut builder = Client::builder();
        if let Some(timeout) = args.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self { client: builder.build()?, create_url: args.create_url.clone(), status_url: args.status_url.clone() })
    }

    fn status_url_for(&self, external_id: &str) -> Url {
        let mut url = self.status_url.clone();
        url.query_pairs_mut().append_pair(ADJUDICATOR_STATUS_QUERY_PARAM, external_id);
        url
    }
}

#[async_trait]
impl AdjudicatorClient for HttpAdjudicatorClient {
    async fn submit_application(
        &self,
        request: &SubmitApplicationRequest,
    ) -> Result<SubmissionOutcome, AdjudicatorError> {
        let response = self.client.post(self.create_url.clone()).json(request).send().await?;
        let status = response.status();
        debug!(external_id = %request.id, status = status.as_u16(), "Adjudicator answered submission");

        match status {
            StatusCode::CREATED => Ok(SubmissionOutcome::Accepted),
            StatusCode::BAD_REQUEST => Ok(SubmissionOutcome::DuplicateId),
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(AdjudicatorError::UnexpectedStatus { status: status.as_u16(), body })
            }
        }
    }

    async fn application_status(&self, external_id: &str) -> Result<ApplicationStatusResponse, AdjudicatorError> {
        let response = self.client.get(self.status_url_for(external_id)).send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(external_id = %external_id, status = status.as_u16(), "Adjudicator answered status query");

        match status {
            StatusCode::OK => Ok(serde_json::from_str(&body)?),
            _ => Err(AdjudicatorError::UnexpectedStatus { status: status.as_u16(), body }),
        }
    }
}
