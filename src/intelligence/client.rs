//! Network-backed intelligence with local fallback.
//!
//! The CRM backend can compute a richer analysis (real sentiment, an
//! executive summary). This client fetches it and, when the fetch fails
//! on a non-forced request, falls back to fetching the raw deal and
//! running the local engine. A forced refresh propagates the failure
//! instead — the caller asked for fresh remote data specifically.
//!
//! No retry, caching, or cancellation lives here; callers own those.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::StatusCode;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::deal::Deal;
use crate::error::{ApiError, Result};
use crate::intelligence::engine;
use crate::intelligence::types::DealIntelligence;

/// Remote deal API — pure I/O, no analysis logic.
#[async_trait]
pub trait DealApi: Send + Sync {
    /// `GET /deals/{id}/intelligence?forceRefresh={bool}`.
    async fn fetch_intelligence(
        &self,
        deal_id: Uuid,
        force_refresh: bool,
    ) -> std::result::Result<DealIntelligence, ApiError>;

    /// `GET /deals/{id}` — the raw deal, used as the fallback source.
    async fn fetch_deal(&self, deal_id: Uuid) -> std::result::Result<Deal, ApiError>;
}

/// `DealApi` over HTTP via reqwest.
pub struct HttpDealApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpDealApi {
    pub fn new(config: &ApiConfig) -> std::result::Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Transport {
                url: config.base_url.clone(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            base_url: config.base_url.clone(),
            client,
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: String,
    ) -> std::result::Result<T, ApiError> {
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Transport {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                url,
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(|e| ApiError::Decode {
            url,
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl DealApi for HttpDealApi {
    async fn fetch_intelligence(
        &self,
        deal_id: Uuid,
        force_refresh: bool,
    ) -> std::result::Result<DealIntelligence, ApiError> {
        let url = format!(
            "{}/deals/{deal_id}/intelligence?forceRefresh={force_refresh}",
            self.base_url
        );
        self.get_json(url).await
    }

    async fn fetch_deal(&self, deal_id: Uuid) -> std::result::Result<Deal, ApiError> {
        let url = format!("{}/deals/{deal_id}", self.base_url);
        self.get_json(url).await
    }
}

/// Serves intelligence from the remote analysis, falling back to the
/// local engine when it can.
pub struct IntelligenceService {
    api: Arc<dyn DealApi>,
}

impl IntelligenceService {
    pub fn new(api: Arc<dyn DealApi>) -> Self {
        Self { api }
    }

    /// Fetch intelligence for a deal.
    ///
    /// On remote failure with `force_refresh` unset: fetch the raw deal
    /// and analyse locally. With `force_refresh` set, the remote error
    /// propagates — no silent downgrade on an explicit refresh.
    pub async fn intelligence(
        &self,
        deal_id: Uuid,
        force_refresh: bool,
    ) -> Result<DealIntelligence> {
        match self.api.fetch_intelligence(deal_id, force_refresh).await {
            Ok(intel) => {
                info!(%deal_id, score = intel.health_score, "Remote intelligence served");
                Ok(intel)
            }
            Err(e) if force_refresh => Err(e.into()),
            Err(e) => {
                warn!(%deal_id, error = %e, "Remote intelligence failed; falling back to local engine");
                let deal = self.api.fetch_deal(deal_id).await?;
                Ok(engine::analyse(&deal, Utc::now()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deal::{DealStage, PipelineType, RiskLevel};
    use crate::intelligence::types::{EmailSentiment, StageHealth};
    use chrono::Duration;
    use std::sync::Mutex;

    /// Mock API: scripted responses plus call counters.
    struct MockApi {
        intelligence: Option<DealIntelligence>,
        deal: Option<Deal>,
        intelligence_calls: Mutex<u32>,
        deal_calls: Mutex<u32>,
    }

    impl MockApi {
        fn new(intelligence: Option<DealIntelligence>, deal: Option<Deal>) -> Self {
            Self {
                intelligence,
                deal,
                intelligence_calls: Mutex::new(0),
                deal_calls: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl DealApi for MockApi {
        async fn fetch_intelligence(
            &self,
            _deal_id: Uuid,
            _force_refresh: bool,
        ) -> std::result::Result<DealIntelligence, ApiError> {
            *self.intelligence_calls.lock().unwrap() += 1;
            self.intelligence.clone().ok_or(ApiError::Status {
                url: "http://mock/deals/x/intelligence".into(),
                status: 503,
                body: "unavailable".into(),
            })
        }

        async fn fetch_deal(&self, _deal_id: Uuid) -> std::result::Result<Deal, ApiError> {
            *self.deal_calls.lock().unwrap() += 1;
            self.deal.clone().ok_or(ApiError::Status {
                url: "http://mock/deals/x".into(),
                status: 404,
                body: "not found".into(),
            })
        }
    }

    fn make_deal() -> Deal {
        Deal {
            id: Uuid::new_v4(),
            pipeline_type: PipelineType::Buyer,
            stage: DealStage::Viewings,
            stage_entered_at: Utc::now() - Duration::days(2),
            last_contact_at: Some(Utc::now() - Duration::days(1)),
            go_live_date: None,
            conditions: vec![],
            contacts: vec![],
            property: None,
            risk_level: RiskLevel::None,
        }
    }

    fn make_remote_intelligence(deal_id: Uuid) -> DealIntelligence {
        DealIntelligence {
            deal_id,
            health_score: 55,
            health_velocity: -4,
            risk_signals: vec![],
            suggested_power_move: None,
            coaching_insight: "Remote says: steady the buyer.".into(),
            email_sentiment: EmailSentiment::Negative,
            needs_live_session: true,
            days_in_stage: 9,
            stage_health_status: StageHealth::Warning,
            executive_summary: Some("Buyer confidence slipping after valuation.".into()),
        }
    }

    #[tokio::test]
    async fn remote_success_is_returned_verbatim() {
        let deal_id = Uuid::new_v4();
        let api = Arc::new(MockApi::new(Some(make_remote_intelligence(deal_id)), None));
        let service = IntelligenceService::new(api.clone());

        let intel = service.intelligence(deal_id, false).await.unwrap();
        assert_eq!(intel.health_score, 55);
        assert_eq!(intel.email_sentiment, EmailSentiment::Negative);
        assert!(intel.executive_summary.is_some());
        assert_eq!(*api.deal_calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn remote_failure_falls_back_to_local_engine() {
        let deal = make_deal();
        let deal_id = deal.id;
        let api = Arc::new(MockApi::new(None, Some(deal)));
        let service = IntelligenceService::new(api.clone());

        let intel = service.intelligence(deal_id, false).await.unwrap();
        // Local engine output: clean deal, neutral placeholder sentiment
        assert_eq!(intel.deal_id, deal_id);
        assert_eq!(intel.health_score, 100);
        assert_eq!(intel.email_sentiment, EmailSentiment::Neutral);
        assert!(intel.executive_summary.is_none());
        assert_eq!(*api.deal_calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn forced_refresh_propagates_the_failure() {
        let api = Arc::new(MockApi::new(None, Some(make_deal())));
        let service = IntelligenceService::new(api.clone());

        let result = service.intelligence(Uuid::new_v4(), true).await;
        assert!(result.is_err());
        // No fallback attempt was made
        assert_eq!(*api.deal_calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn fallback_deal_fetch_failure_propagates() {
        let api = Arc::new(MockApi::new(None, None));
        let service = IntelligenceService::new(api);

        let result = service.intelligence(Uuid::new_v4(), false).await;
        assert!(result.is_err());
    }
}
