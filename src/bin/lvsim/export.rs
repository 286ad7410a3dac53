//! CSV export of the plot series.

use std::io::Write;

use lvsim::lotka_volterra::Trajectory;

use crate::cli::Chart;

/// Writes the columns for `chart`, one row per sample, with a header line.
pub fn write_csv<W: Write>(
    out: &mut W,
    trajectory: &Trajectory,
    chart: Chart,
) -> std::io::Result<()> {
    match chart {
        Chart::All => {
            writeln!(out, "t,prey,predator")?;
            for (t, s) in trajectory.iter() {
                writeln!(out, "{t},{},{}", s.prey, s.predator)?;
            }
        }
        Chart::Prey => {
            writeln!(out, "t,prey")?;
            for (t, s) in trajectory.iter() {
                writeln!(out, "{t},{}", s.prey)?;
            }
        }
        Chart::Phase => {
            writeln!(out, "prey,predator")?;
            for (prey, predator) in trajectory.phase_plane() {
                writeln!(out, "{prey},{predator}")?;
            }
        }
    }
    out.flush()
}
