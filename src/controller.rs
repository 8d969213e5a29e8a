//! One round trip from the coordinate form to the result area and the map.
//!
//! Every submission is independent: it validates its own input, issues at
//! most one request and, on success, replaces the map marker. Submissions may
//! overlap; with [`RacePolicy::LastResolvedWins`] whichever response settles
//! last decides what is shown, with [`RacePolicy::LatestIssuedOnly`] responses
//! to anything but the newest submission are dropped.

pub mod view;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::anyhow;

use crate::api::predict_service::RiskService;
use crate::api::{RiskRequest, RiskResult};
use crate::map::{LatLng, MapSurface, MapView, MarkerId};
use crate::risk::RiskScore;

pub use view::{ResultDisplay, ResultView};

#[derive(Debug)]
pub enum QueryError {
    /// Input did not parse or is outside the coordinate range.
    Validation,
    /// The service answered with `success: false`.
    Service(String),
    /// No usable answer: network failure or an undecodable body.
    Transport(anyhow::Error),
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::Validation => f.write_str("invalid coordinates"),
            QueryError::Service(message) => write!(f, "prediction error: {message}"),
            QueryError::Transport(e) => write!(f, "transport error: {e}"),
        }
    }
}

impl std::error::Error for QueryError {}

impl QueryError {
    fn view(&self) -> ResultView {
        match self {
            QueryError::Validation => ResultView::Invalid,
            QueryError::Service(message) => ResultView::ServiceError {
                message: message.clone(),
            },
            QueryError::Transport(_) => ResultView::ConnectionError,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskQuery {
    pub latitude: f64,
    pub longitude: f64,
}

impl RiskQuery {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, QueryError> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        if !valid {
            return Err(QueryError::Validation);
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parses the raw form fields. Surrounding whitespace is ignored; any other
    /// non-numeric content fails.
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, QueryError> {
        let parse = |raw: &str| raw.trim().parse::<f64>().map_err(|_| QueryError::Validation);
        Self::new(parse(latitude)?, parse(longitude)?)
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

impl From<RiskQuery> for RiskRequest {
    fn from(q: RiskQuery) -> Self {
        RiskRequest {
            lat: q.latitude,
            lon: q.longitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RacePolicy {
    #[default]
    LastResolvedWins,
    LatestIssuedOnly,
}

#[derive(Debug)]
pub enum Outcome {
    Placed { marker: MarkerId, score: RiskScore },
    Failed(QueryError),
    /// A newer submission was issued while this one was in flight.
    Superseded,
}

pub struct RiskQueryController<S, D, P> {
    view: Mutex<MapView<S>>,
    display: Mutex<D>,
    service: P,
    policy: RacePolicy,
    issued: AtomicU64,
}

impl<S, D, P> RiskQueryController<S, D, P>
where
    S: MapSurface,
    D: ResultDisplay,
    P: RiskService,
{
    pub fn new(view: MapView<S>, display: D, service: P) -> Self {
        Self {
            view: Mutex::new(view),
            display: Mutex::new(display),
            service,
            policy: RacePolicy::default(),
            issued: AtomicU64::new(0),
        }
    }

    pub fn with_policy(mut self, policy: RacePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Runs one query from the raw form values. `Err` is reserved for map
    /// rendering failures; every query failure is an [`Outcome::Failed`].
    pub async fn submit(&self, latitude: &str, longitude: &str) -> anyhow::Result<Outcome> {
        // Stamped before validation: a rejected submission still supersedes
        // whatever is in flight.
        let token = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        let parsed = RiskQuery::parse(latitude, longitude);

        {
            let _view = lock(&self.view);
            if self.is_superseded(token) {
                return Ok(Outcome::Superseded);
            }
            match &parsed {
                Ok(_) => self.show(ResultView::Pending),
                Err(e) => self.show(e.view()),
            }
        }

        let query = match parsed {
            Ok(query) => query,
            Err(e) => return Ok(Outcome::Failed(e)),
        };

        let response = self.service.predict_risk(query.into()).await;

        // Held until the result area and the marker agree. Lock order is
        // always view, then display.
        let mut view = lock(&self.view);

        if self.is_superseded(token) {
            log::debug!("dropping response to superseded query #{token}");
            return Ok(Outcome::Superseded);
        }

        let (score, message) = match interpret(response) {
            Ok(answer) => answer,
            Err(e) => {
                match &e {
                    QueryError::Transport(err) => log::error!("error fetching prediction: {err:#}"),
                    other => log::warn!("query #{token}: {other}"),
                }
                self.show(e.view());
                return Ok(Outcome::Failed(e));
            }
        };

        self.show(ResultView::Success {
            position: query.position(),
            score,
            message: message.clone(),
        });

        let marker = view.place_marker(query.position(), score, &message)?;

        Ok(Outcome::Placed { marker, score })
    }

    pub fn with_view<R>(&self, f: impl FnOnce(&MapView<S>) -> R) -> R {
        f(&lock(&self.view))
    }

    pub fn with_display<R>(&self, f: impl FnOnce(&D) -> R) -> R {
        f(&lock(&self.display))
    }

    fn is_superseded(&self, token: u64) -> bool {
        self.policy == RacePolicy::LatestIssuedOnly && self.issued.load(Ordering::SeqCst) != token
    }

    fn show(&self, view: ResultView) {
        lock(&self.display).show(view);
    }
}

fn interpret(response: anyhow::Result<RiskResult>) -> Result<(RiskScore, String), QueryError> {
    let result = response.map_err(QueryError::Transport)?;

    if !result.success {
        return Err(QueryError::Service(result.message));
    }

    let score = result
        .risk_score
        .and_then(|s| u8::try_from(s).ok())
        .and_then(RiskScore::new)
        .ok_or_else(|| {
            QueryError::Transport(anyhow!(
                "response has no valid risk_score: {:?}",
                result.risk_score
            ))
        })?;

    Ok((score, result.message))
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
