use std::time::Duration;

// =============================================================================
// Demo parameters
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    pub timeout_secs: u64,
}

impl TimeoutConfig {
    pub fn new(timeout_secs: u64) -> Self {
        TimeoutConfig { timeout_secs }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        TimeoutConfig::new(5)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueDemoConfig {
    pub capacity: usize,
    pub batch_size: usize,
    pub producer_delay: Duration,
    pub consumer_delay: Duration,
}

impl QueueDemoConfig {
    /// Producer keeps up with the consumer, so the queue fills and pushes
    /// start to wait.
    pub fn input_faster() -> Self {
        QueueDemoConfig {
            capacity: 5,
            batch_size: 2,
            producer_delay: Duration::from_secs(2),
            consumer_delay: Duration::from_secs(2),
        }
    }

    /// Consumer drains faster than the producer refills, so pops start to
    /// find the queue empty.
    pub fn output_faster() -> Self {
        QueueDemoConfig {
            capacity: 5,
            batch_size: 2,
            producer_delay: Duration::from_secs(6),
            consumer_delay: Duration::from_millis(2000),
        }
    }
}

// =============================================================================
// Command line
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Echo each line to stdout; end of input is an error.
    Simple,
    /// Log each line as it arrives from a background reader.
    Inc,
    /// Race each line against a timer.
    IncSec(TimeoutConfig),
    /// Producer/consumer over a bounded queue.
    Queue(QueueDemoConfig),
}

impl Command {
    /// Maps the arguments after the program name to a demo. Anything other
    /// than exactly one known token runs the timed input demo.
    pub fn from_args<I, S>(args: I) -> Command
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter();
        match (args.next(), args.next()) {
            (Some(token), None) => Command::from_token(token.as_ref()),
            _ => Command::default(),
        }
    }

    pub fn from_token(token: &str) -> Command {
        match token {
            "simple" => Command::Simple,
            "inc" => Command::Inc,
            "incsec" => Command::IncSec(TimeoutConfig::default()),
            "chanin" => Command::Queue(QueueDemoConfig::input_faster()),
            "chanout" => Command::Queue(QueueDemoConfig::output_faster()),
            _ => Command::default(),
        }
    }

    pub fn title(&self) -> String {
        match self {
            Command::Simple => "Line echo".to_string(),
            Command::Inc => "Blocking line dispatcher".to_string(),
            Command::IncSec(config) => {
                format!("Line input with a {}s timeout", config.timeout_secs)
            }
            Command::Queue(config) => format!(
                "Bounded queue (capacity {}, batch {}, produce every {:?}, consume every {:?})",
                config.capacity, config.batch_size, config.producer_delay, config.consumer_delay
            ),
        }
    }
}

impl Default for Command {
    fn default() -> Self {
        Command::IncSec(TimeoutConfig::default())
    }
}
