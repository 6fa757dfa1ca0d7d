use {
    crate::envs::Tick,
    anyhow::Result,
    ordered_float::OrderedFloat,
    polars::prelude::{
        DataFrame,
        NamedFrom,
        Series,
    },
    std::io::Write,
};

/// The column names of a [`LogRecord`], in CSV order.
pub const LABELS: [&str; 20] = [
    "episode",
    "time",
    "x",
    "y",
    "z",
    "phi",
    "theta",
    "psi",
    "x_velocity",
    "y_velocity",
    "z_velocity",
    "phi_velocity",
    "theta_velocity",
    "psi_velocity",
    "rotor_speed1",
    "rotor_speed2",
    "rotor_speed3",
    "rotor_speed4",
    "reward",
    "cumulative_reward",
];

/// One row of the training log.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub episode: usize,
    pub time: f64,
    pub pose: [f64; 6],
    pub velocity: [f64; 3],
    pub angular_velocity: [f64; 3],
    pub rotor_speeds: [f64; 4],
    pub reward: f64,
    pub cumulative_reward: f64,
}

impl LogRecord {
    pub fn new(
        episode: usize,
        tick: &Tick,
        rotor_speeds: [f64; 4],
        reward: f64,
        cumulative_reward: f64,
    ) -> Self {
        Self {
            episode,
            time: tick.time,
            pose: tick.pose,
            velocity: tick.velocity,
            angular_velocity: tick.angular_velocity,
            rotor_speeds,
            reward,
            cumulative_reward,
        }
    }

    /// The numeric columns after `episode`, in [`LABELS`] order.
    pub fn values(&self) -> [f64; 19] {
        let mut values = [0.0; 19];
        values[0] = self.time;
        values[1..7].copy_from_slice(&self.pose);
        values[7..10].copy_from_slice(&self.velocity);
        values[10..13].copy_from_slice(&self.angular_velocity);
        values[13..17].copy_from_slice(&self.rotor_speeds);
        values[17] = self.reward;
        values[18] = self.cumulative_reward;
        values
    }

    /// Append this record as one CSV row.
    pub fn write_csv<W: Write>(
        &self,
        writer: &mut csv::Writer<W>,
    ) -> Result<()> {
        let row = std::iter::once(self.episode.to_string())
            .chain(self.values().into_iter().map(|v| v.to_string()));
        writer.write_record(row)?;
        Ok(())
    }
}

/// Write the [`LABELS`] header row.
pub fn write_csv_header<W: Write>(writer: &mut csv::Writer<W>) -> Result<()> {
    writer.write_record(LABELS)?;
    Ok(())
}


/// Everything recorded during one call to [`train`](super::train).
#[derive(Debug, Clone, Default)]
pub struct TrainingLog {
    pub records: Vec<LogRecord>,
    pub episode_returns: Vec<f64>,
}

impl TrainingLog {
    /// The highest episode return, if any episode finished.
    pub fn best_return(&self) -> Option<f64> {
        self.episode_returns
            .iter()
            .copied()
            .map(OrderedFloat)
            .max()
            .map(|r| r.into_inner())
    }

    /// All records as a table with the [`LABELS`] columns.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let episodes = self
            .records
            .iter()
            .map(|r| r.episode as u64)
            .collect::<Vec<_>>();
        let values = self
            .records
            .iter()
            .map(LogRecord::values)
            .collect::<Vec<_>>();

        let mut columns = vec![Series::new(LABELS[0], &episodes)];
        for (i, label) in LABELS.iter().enumerate().skip(1) {
            let column = values.iter().map(|v| v[i - 1]).collect::<Vec<_>>();
            columns.push(Series::new(label, &column));
        }
        Ok(DataFrame::new(columns)?)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn record(episode: usize, reward: f64) -> LogRecord {
        let tick = Tick {
            time: 0.02,
            pose: [1.0, 2.0, 3.0, 0.1, 0.2, 0.3],
            velocity: [4.0, 5.0, 6.0],
            angular_velocity: [0.4, 0.5, 0.6],
            reward,
        };
        LogRecord::new(episode, &tick, [400.0, 401.0, 402.0, 403.0], reward, 2.0 * reward)
    }

    #[test]
    fn csv_rows_match_the_header() {
        let mut writer = csv::Writer::from_writer(vec![]);
        write_csv_header(&mut writer).unwrap();
        record(1, 0.5).write_csv(&mut writer).unwrap();
        let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();

        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].split(',').count(), 20);
        assert!(lines[0].starts_with("episode,time,x,y,z"));
        assert!(lines[0].ends_with("reward,cumulative_reward"));

        let row = lines[1].split(',').collect::<Vec<_>>();
        assert_eq!(row.len(), 20);
        assert_eq!(row[0], "1");
        assert_eq!(row[4], "3");
        assert_eq!(row[14], "400");
        assert_eq!(row[19], "1");
    }

    #[test]
    fn dataframe_has_every_column() {
        let log = TrainingLog {
            records: vec![record(1, 0.5), record(1, 1.0), record(2, -1.0)],
            episode_returns: vec![1.5, -1.0],
        };
        let df = log.to_dataframe().unwrap();
        assert_eq!(df.width(), 20);
        assert_eq!(df.height(), 3);
        assert_eq!(df.get_column_names(), LABELS.to_vec());
    }

    #[test]
    fn best_return() {
        assert_eq!(TrainingLog::default().best_return(), None);
        let log = TrainingLog {
            records: vec![],
            episode_returns: vec![-3.0, 7.5, 2.0],
        };
        assert_eq!(log.best_return(), Some(7.5));
    }
}
