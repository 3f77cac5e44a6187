use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use mechanics::{BicycleState, LongitudinalState};
use simcore::{SimResult, Trajectory};

/// A state that can be written as one CSV row.
pub trait CsvRow {
    const HEADER: &'static str;

    fn write_row(&self, t: f64, out: &mut impl Write) -> std::io::Result<()>;
}

impl CsvRow for LongitudinalState {
    const HEADER: &'static str = "t,x,v,a,w_e,w_e_dot";

    fn write_row(&self, t: f64, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(
            out,
            "{:.4},{:.6},{:.6},{:.6},{:.6},{:.6}",
            t, self.x, self.v, self.a, self.w_e, self.w_e_dot
        )
    }
}

impl CsvRow for BicycleState {
    const HEADER: &'static str = "t,xc,yc,theta,delta,beta";

    fn write_row(&self, t: f64, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(
            out,
            "{:.4},{:.6},{:.6},{:.6},{:.6},{:.6}",
            t, self.xc, self.yc, self.theta, self.delta, self.beta
        )
    }
}

pub fn write_csv<S: CsvRow + Copy>(trajectory: &Trajectory<S>, out: &mut impl Write) -> SimResult<()> {
    writeln!(out, "{}", S::HEADER)?;
    for sample in trajectory.iter() {
        sample.state.write_row(sample.t, out)?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_csv_file<S: CsvRow + Copy>(dir: &Path, name: &str, trajectory: &Trajectory<S>) -> SimResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{name}.csv"));
    let mut out = BufWriter::new(File::create(&path)?);
    write_csv(trajectory, &mut out)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longitudinal_csv() {
        let mut traj = Trajectory::new();
        traj.record(0.0, LongitudinalState::INITIAL);
        let mut buf = Vec::new();
        write_csv(&traj, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("t,x,v,a,w_e,w_e_dot"));
        assert_eq!(
            lines.next(),
            Some("0.0000,0.000000,5.000000,0.000000,100.000000,0.000000")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_bicycle_csv_header() {
        let traj: Trajectory<BicycleState> = Trajectory::new();
        let mut buf = Vec::new();
        write_csv(&traj, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "t,xc,yc,theta,delta,beta\n");
    }
}
