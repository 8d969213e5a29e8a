use crate::html;
use crate::map::LatLng;
use crate::risk::RiskScore;

pub const VALIDATION_MESSAGE: &str =
    "Please enter valid latitude (-90 to 90) and longitude (-180 to 180).";
pub const PENDING_MESSAGE: &str = "Calculating risk...";
pub const CONNECTION_ERROR_MESSAGE: &str = "Could not connect to the prediction service.";

/// What the result area shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultView {
    Invalid,
    Pending,
    ServiceError {
        message: String,
    },
    ConnectionError,
    Success {
        position: LatLng,
        score: RiskScore,
        message: String,
    },
}

impl ResultView {
    /// Severity color of a successful result.
    pub fn color(&self) -> Option<&'static str> {
        match self {
            ResultView::Success { score, .. } => Some(score.severity().color()),
            _ => None,
        }
    }

    pub fn to_html(&self) -> String {
        let error = |text: &str| format!("<span style=\"color: red;\">{text}</span>");

        match self {
            ResultView::Invalid => error(VALIDATION_MESSAGE),
            ResultView::Pending => PENDING_MESSAGE.to_string(),
            ResultView::ServiceError { message } => {
                error(&format!("Prediction Error: {}", html::escape(message)))
            }
            ResultView::ConnectionError => error(CONNECTION_ERROR_MESSAGE),
            ResultView::Success {
                position,
                score,
                message,
            } => format!(
                "<p><strong>Location:</strong> {position}</p>\
                 <p><strong>Predicted Risk Score:</strong> \
                 <span style=\"color: {}; font-size: 1.2em;\">{score}/100</span></p>\
                 <p><strong>Assessment:</strong> {}</p>",
                score.severity().color(),
                html::escape(message)
            ),
        }
    }
}

impl std::fmt::Display for ResultView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultView::Invalid => f.write_str(VALIDATION_MESSAGE),
            ResultView::Pending => f.write_str(PENDING_MESSAGE),
            ResultView::ServiceError { message } => write!(f, "Prediction Error: {message}"),
            ResultView::ConnectionError => f.write_str(CONNECTION_ERROR_MESSAGE),
            ResultView::Success {
                position,
                score,
                message,
            } => write!(
                f,
                "Location: {position}\nPredicted Risk Score: {score}/100 ({})\nAssessment: {message}",
                score.severity().color()
            ),
        }
    }
}

/// The result area of the page.
pub trait ResultDisplay: Send {
    fn show(&mut self, view: ResultView);
}

/// Holds what the result area currently shows.
impl ResultDisplay for Option<ResultView> {
    fn show(&mut self, view: ResultView) {
        *self = Some(view);
    }
}

/// Keeps every view shown, newest last.
#[cfg(test)]
impl ResultDisplay for Vec<ResultView> {
    fn show(&mut self, view: ResultView) {
        self.push(view);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success(score: u8, message: &str) -> ResultView {
        ResultView::Success {
            position: LatLng::new(34.05, -118.25),
            score: RiskScore::new(score).unwrap(),
            message: message.into(),
        }
    }

    #[test]
    fn success_html_carries_location_score_and_color() {
        assert_eq!(
            success(85, "Severe").to_html(),
            "<p><strong>Location:</strong> 34.0500, -118.2500</p>\
             <p><strong>Predicted Risk Score:</strong> \
             <span style=\"color: darkred; font-size: 1.2em;\">85/100</span></p>\
             <p><strong>Assessment:</strong> Severe</p>"
        );
    }

    #[test]
    fn error_html_is_red() {
        assert_eq!(
            ResultView::ServiceError {
                message: "model unavailable".into()
            }
            .to_html(),
            "<span style=\"color: red;\">Prediction Error: model unavailable</span>"
        );
        assert_eq!(
            ResultView::Invalid.to_html(),
            "<span style=\"color: red;\">Please enter valid latitude (-90 to 90) and longitude (-180 to 180).</span>"
        );
        assert_eq!(ResultView::Pending.to_html(), "Calculating risk...");
    }

    #[test]
    fn color_only_for_success() {
        assert_eq!(success(39, "").color(), Some("green"));
        assert_eq!(ResultView::ConnectionError.color(), None);
    }

    #[test]
    fn result_area_holds_latest_view() {
        let mut area: Option<ResultView> = None;

        area.show(ResultView::Pending);
        area.show(success(85, "Severe"));
        assert_eq!(area, Some(success(85, "Severe")));

        area.show(ResultView::ConnectionError);
        assert_eq!(area, Some(ResultView::ConnectionError));
    }

    #[test]
    fn plain_text_rendering() {
        assert_eq!(
            success(61, "High Risk: Vigilance and planning required.").to_string(),
            "Location: 34.0500, -118.2500\n\
             Predicted Risk Score: 61/100 (red)\n\
             Assessment: High Risk: Vigilance and planning required."
        );
    }
}
