//! Workshop analytics dashboard.
//!
//! Holds the static datasets, the animated headline counters, the completion
//! bars and a simulated live feed. Every painter draws into a caller-supplied
//! [`Canvas`], so the same dashboard renders to the browser or to a
//! [`vitrine_core::RecordingCanvas`] in tests.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use vitrine_core::chart::{draw_doughnut_chart, draw_line_chart, draw_radar_chart};
use vitrine_core::config::DashboardConfig;
use vitrine_core::{
    Canvas, ChartError, ChartOptions, ChartStyle, Color, Dataset, EasedValue, Easing, FontWeight,
    MetricAnimator, Palette, Point, RadarAxis, Rect, TextAlign, TextStyle,
};

/// Delay before the completion bars start filling.
pub const BAR_DELAY_MS: f64 = 500.0;

/// Completion bar fill duration.
pub const BAR_DURATION_MS: f64 = 1500.0;

/// Enrollment chart entrance duration.
pub const CHART_REVEAL_MS: f64 = 1000.0;

/// Skills distribution with each slice's color.
const SKILLS: [(&str, f64, &str); 6] = [
    ("Python", 35.0, "#3498db"),
    ("JavaScript", 28.0, "#e74c3c"),
    ("Data Science", 22.0, "#2ecc71"),
    ("Web Dev", 18.0, "#f39c12"),
    ("AI/ML", 15.0, "#9b59b6"),
    ("Cloud", 12.0, "#1abc9c"),
];

/// Completion bar fill runs from the first color at its left edge to the
/// second at 100%.
const BAR_GRADIENT: [&str; 2] = ["#3498db", "#2ecc71"];

const ACTIVITIES: [&str; 6] = [
    "New user enrolled in Python Basics",
    "Workshop \"Data Science\" rated 5 stars",
    "Certificate issued for Machine Learning",
    "Study group created for Web Development",
    "New analytics report generated",
    "Workshop content updated",
];

/// Reporting window selected in the dashboard header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeRange {
    /// Last 7 days
    #[serde(rename = "7d")]
    Week,
    /// Last 30 days
    #[default]
    #[serde(rename = "30d")]
    Month,
    /// Last 90 days
    #[serde(rename = "90d")]
    Quarter,
    /// Last year
    #[serde(rename = "1y")]
    Year,
}

impl TimeRange {
    /// Short code used by the range selector.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Week => "7d",
            Self::Month => "30d",
            Self::Quarter => "90d",
            Self::Year => "1y",
        }
    }

    /// Parse a selector code.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "7d" => Some(Self::Week),
            "30d" => Some(Self::Month),
            "90d" => Some(Self::Quarter),
            "1y" => Some(Self::Year),
            _ => None,
        }
    }
}

/// Completion statistics for one workshop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkshopCompletion {
    /// Workshop title
    pub name: String,
    /// Completion rate in percent
    pub completion: f64,
    /// Enrolled participants
    pub participants: u32,
}

/// Live headline numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Users online now
    pub active_users: u64,
    /// Workshops in session
    pub ongoing_workshops: u64,
    /// Certificates issued to date
    pub certificates_issued: u64,
    /// Mean rating out of 5
    pub avg_rating: f64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            active_users: 1247,
            ongoing_workshops: 8,
            certificates_issued: 2456,
            avg_rating: 4.7,
        }
    }
}

/// One line of the activity feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEntry {
    /// What happened
    pub message: String,
    /// Host clock when it was recorded
    pub at_ms: f64,
}

#[derive(Debug, Clone)]
struct Counters {
    users: MetricAnimator,
    workshops: MetricAnimator,
    certificates: MetricAnimator,
    rating: MetricAnimator,
}

impl Counters {
    fn new(metrics: &Metrics) -> Self {
        Self {
            users: MetricAnimator::new(metrics.active_users as f64, 2000.0, 0),
            workshops: MetricAnimator::new(metrics.ongoing_workshops as f64, 1500.0, 0),
            certificates: MetricAnimator::new(metrics.certificates_issued as f64, 2500.0, 0),
            rating: MetricAnimator::new(metrics.avg_rating, 1800.0, 1),
        }
    }

    fn all_mut(&mut self) -> [&mut MetricAnimator; 4] {
        [
            &mut self.users,
            &mut self.workshops,
            &mut self.certificates,
            &mut self.rating,
        ]
    }
}

#[derive(Debug, Serialize)]
struct Export<'a> {
    timestamp: &'a str,
    time_range: TimeRange,
    metrics: &'a Metrics,
    enrollments: &'a Dataset,
    skills: &'a Dataset,
    completion: &'a [WorkshopCompletion],
}

/// Analytics dashboard state.
#[derive(Debug, Clone)]
pub struct Dashboard {
    config: DashboardConfig,
    time_range: TimeRange,
    enrollments: Dataset,
    skills: Dataset,
    skill_colors: Vec<Color>,
    completion: Vec<WorkshopCompletion>,
    radar: Vec<RadarAxis>,
    metrics: Metrics,
    counters: Counters,
    bars: EasedValue,
    bars_start_ms: Option<f64>,
    reveal: EasedValue,
    reveal_start_ms: Option<f64>,
    last_update_ms: Option<f64>,
    feed: VecDeque<FeedEntry>,
    rng: Pcg64Mcg,
}

impl Dashboard {
    /// Create a dashboard with the built-in data. Nothing animates until
    /// [`Dashboard::start`].
    #[must_use]
    pub fn new(config: DashboardConfig) -> Self {
        let metrics = Metrics::default();
        let rng = Pcg64Mcg::seed_from_u64(config.seed);
        let mut dashboard = Self {
            counters: Counters::new(&metrics),
            metrics,
            time_range: TimeRange::default(),
            enrollments: Dataset::default(),
            skills: Dataset::default(),
            skill_colors: Vec::new(),
            completion: Vec::new(),
            radar: Vec::new(),
            bars: EasedValue::new(0.0, 1.0, BAR_DURATION_MS).with_easing(Easing::EaseOut),
            bars_start_ms: None,
            reveal: EasedValue::new(0.0, 1.0, CHART_REVEAL_MS).with_easing(Easing::CubicOut),
            reveal_start_ms: None,
            last_update_ms: None,
            feed: VecDeque::with_capacity(config.feed_capacity),
            rng,
            config,
        };
        dashboard.load_data();
        dashboard
    }

    fn load_data(&mut self) {
        self.enrollments = Dataset::from_pairs([
            ("Jan", 120.0),
            ("Feb", 150.0),
            ("Mar", 180.0),
            ("Apr", 220.0),
            ("May", 280.0),
            ("Jun", 320.0),
        ]);
        self.skills = Dataset::from_pairs(SKILLS.map(|(label, value, _)| (label, value)));
        let fallback = ChartStyle::default().series;
        self.skill_colors = SKILLS.iter().map(|(_, _, hex)| hex_or(hex, fallback)).collect();
        self.completion = [
            ("Python Basics", 92.0, 150),
            ("Data Science", 85.0, 120),
            ("Web Development", 88.0, 200),
            ("Machine Learning", 78.0, 80),
            ("Cloud Computing", 82.0, 90),
        ]
        .into_iter()
        .map(|(name, completion, participants)| WorkshopCompletion {
            name: name.to_string(),
            completion,
            participants,
        })
        .collect();
        self.radar = vec![
            RadarAxis::new("Programming", 0.8),
            RadarAxis::new("Problem Solving", 0.7),
            RadarAxis::new("Collaboration", 0.9),
            RadarAxis::new("Communication", 0.6),
            RadarAxis::new("Leadership", 0.5),
        ];
        self.metrics = Metrics::default();
        self.counters = Counters::new(&self.metrics);
    }

    /// Start the counters, the chart entrance and the completion bars.
    pub fn start(&mut self, now_ms: f64) {
        for counter in self.counters.all_mut() {
            counter.start(now_ms);
        }
        self.bars.set_elapsed(0.0);
        self.bars_start_ms = Some(now_ms + BAR_DELAY_MS);
        self.reveal.set_elapsed(0.0);
        self.reveal_start_ms = Some(now_ms);
        self.last_update_ms = Some(now_ms);
        log::debug!("dashboard started for range {}", self.time_range.as_str());
    }

    /// Advance animations to `now_ms` and run any due live update.
    ///
    /// Returns `true` when a live update was applied.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        for counter in self.counters.all_mut() {
            counter.tick(now_ms);
        }
        if let Some(start) = self.bars_start_ms {
            self.bars.set_elapsed(now_ms - start);
        }
        if let Some(start) = self.reveal_start_ms {
            self.reveal.set_elapsed(now_ms - start);
        }

        let Some(last) = self.last_update_ms else {
            return false;
        };
        if now_ms - last < self.config.realtime_interval_ms {
            return false;
        }
        self.last_update_ms = Some(now_ms);
        self.apply_drift(now_ms);
        self.push_activity(now_ms);
        true
    }

    fn apply_drift(&mut self, now_ms: f64) {
        let m = &mut self.metrics;
        m.active_users = m.active_users.saturating_add_signed(self.rng.gen_range(-5..5));
        if self.rng.gen_bool(0.2) {
            m.ongoing_workshops += 1;
        }
        m.certificates_issued += self.rng.gen_range(0..=2);

        let (users, workshops, certificates) = (
            m.active_users as f64,
            m.ongoing_workshops as f64,
            m.certificates_issued as f64,
        );
        self.counters.users.retarget(users, now_ms);
        self.counters.workshops.retarget(workshops, now_ms);
        self.counters.certificates.retarget(certificates, now_ms);
    }

    fn push_activity(&mut self, now_ms: f64) {
        let message = ACTIVITIES[self.rng.gen_range(0..ACTIVITIES.len())];
        self.feed.push_front(FeedEntry {
            message: message.to_string(),
            at_ms: now_ms,
        });
        self.feed.truncate(self.config.feed_capacity);
    }

    /// Switch reporting window, reload data and restart the animations.
    pub fn set_time_range(&mut self, range: TimeRange, now_ms: f64) {
        log::info!("updating dashboard for time range {}", range.as_str());
        self.time_range = range;
        self.load_data();
        self.start(now_ms);
    }

    /// Selected reporting window.
    #[must_use]
    pub fn time_range(&self) -> TimeRange {
        self.time_range
    }

    /// Underlying metrics.
    #[must_use]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Counter labels and their current display strings.
    #[must_use]
    pub fn counter_displays(&self) -> [(&'static str, String); 4] {
        [
            ("Active Users", self.counters.users.display()),
            ("Live Workshops", self.counters.workshops.display()),
            ("Certificates Issued", self.counters.certificates.display()),
            ("Average Rating", self.counters.rating.display()),
        ]
    }

    /// Activity feed, newest first.
    pub fn feed(&self) -> impl Iterator<Item = &FeedEntry> {
        self.feed.iter()
    }

    /// Per-workshop completion data.
    #[must_use]
    pub fn completion(&self) -> &[WorkshopCompletion] {
        &self.completion
    }

    /// Current bar widths in percent, following the delayed ease-out fill.
    #[must_use]
    pub fn completion_widths(&self) -> Vec<f64> {
        let fill = if self.bars_start_ms.is_some() && self.bars.elapsed > 0.0 {
            self.bars.value()
        } else {
            0.0
        };
        self.completion.iter().map(|w| w.completion * fill).collect()
    }

    fn chart_options(&self, canvas: &dyn Canvas, palette: &Palette) -> ChartOptions {
        let mut style = palette.chart_style();
        style.slices.clone_from(&self.skill_colors);
        ChartOptions::new(canvas.size()).with_style(style)
    }

    /// Paint the enrollment line chart.
    pub fn paint_enrollment(&self, canvas: &mut dyn Canvas, palette: &Palette) -> bool {
        let mut options = self.chart_options(canvas, palette).animated(self.reveal.value());
        options.fill_area = true;
        report("enrollment", draw_line_chart(canvas, &self.enrollments, &options))
    }

    /// Paint the skills doughnut chart.
    pub fn paint_skills(&self, canvas: &mut dyn Canvas, palette: &Palette) -> bool {
        let options = self
            .chart_options(canvas, palette)
            .with_caption("Skills", "Distribution");
        report("skills", draw_doughnut_chart(canvas, &self.skills, &options))
    }

    /// Paint the skill radar chart.
    pub fn paint_radar(&self, canvas: &mut dyn Canvas, palette: &Palette) -> bool {
        let options = self.chart_options(canvas, palette).animated(self.reveal.value());
        report("radar", draw_radar_chart(canvas, &self.radar, &options))
    }

    /// Paint the completion bars.
    pub fn paint_completion(&self, canvas: &mut dyn Canvas, palette: &Palette) {
        const ROW: f32 = 48.0;
        const BAR_HEIGHT: f32 = 8.0;

        canvas.clear();
        let width = canvas.size().width - 20.0;
        let name_style = TextStyle::new(14.0, palette.text).weight(FontWeight::Bold);
        let rate_style = TextStyle::new(14.0, palette.primary).align(TextAlign::Right);
        let meta_style = TextStyle::new(11.0, palette.text_secondary);
        let [start, end] = BAR_GRADIENT.map(|hex| hex_or(hex, palette.primary));

        for (i, (workshop, pct)) in self.completion.iter().zip(self.completion_widths()).enumerate() {
            let top = 10.0 + i as f32 * ROW;
            canvas.draw_text(&workshop.name, Point::new(10.0, top + 12.0), &name_style);
            canvas.draw_text(
                &format!("{}%", workshop.completion),
                Point::new(10.0 + width, top + 12.0),
                &rate_style,
            );
            canvas.fill_rect(Rect::new(10.0, top + 18.0, width, BAR_HEIGHT), palette.border);
            let filled = (pct / 100.0) as f32;
            canvas.fill_rect(
                Rect::new(10.0, top + 18.0, width * filled, BAR_HEIGHT),
                start.lerp(&end, filled),
            );
            canvas.draw_text(
                &format!("{} participants", workshop.participants),
                Point::new(10.0, top + 40.0),
                &meta_style,
            );
        }
    }

    /// Serialize metrics and datasets as pretty JSON.
    pub fn export_json(&self, timestamp: &str) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Export {
            timestamp,
            time_range: self.time_range,
            metrics: &self.metrics,
            enrollments: &self.enrollments,
            skills: &self.skills,
            completion: &self.completion,
        })
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}

fn hex_or(hex: &str, fallback: Color) -> Color {
    Color::from_hex(hex).unwrap_or_else(|e| {
        log::warn!("{e}");
        fallback
    })
}

fn report(chart: &str, result: Result<(), ChartError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            log::warn!("{chart} chart not drawn: {e}");
            false
        }
    }
}
