//! Calendar instants and durations.

use super::Renderer;
use crate::base::{quote_string, BaseFormatter};
use crate::calendar::{format_duration, to_serial_day};
use crate::{DurationArray, NumericArray, Result, Value};
use chrono::NaiveDateTime;
use ndarray::ArrayD;

impl<F: BaseFormatter> Renderer<F> {
    /// Renders `instant_from(days, origin="serial_day")` where `days` is the
    /// double array of serial day numbers.
    pub(super) fn render_instants(&self, instants: &ArrayD<NaiveDateTime>) -> Result<String> {
        let days = Value::Numeric(NumericArray::Double(instants.map(to_serial_day)));
        Ok(format!(
            "instant_from({}, origin=\"serial_day\")",
            self.render(&days)?
        ))
    }

    /// Renders `duration_from(strs)` over `hh:mm:ss.SSS` text, adding
    /// `format="..."` only when the display format is not the default.
    pub(super) fn render_durations(&self, durations: &DurationArray) -> Result<String> {
        let text = Value::Text(durations.values().map(format_duration));
        let strs = self.render(&text)?;
        if durations.has_default_format() {
            Ok(format!("duration_from({})", strs))
        } else {
            Ok(format!(
                "duration_from({}, format={})",
                strs,
                quote_string(durations.format())
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::render::Renderer;
    use crate::{DurationArray, Value};
    use chrono::{NaiveDate, TimeDelta};
    use ndarray::{ArrayD, IxDyn};

    fn render(value: &Value) -> String {
        Renderer::default().render(value).unwrap()
    }

    #[test]
    fn test_instants_as_serial_days() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let noon = epoch + TimeDelta::hours(12);
        let v = Value::datetimes(&[1, 2], vec![epoch, noon]).unwrap();
        assert_eq!(
            render(&v),
            "instant_from([719529 719529.5], origin=\"serial_day\")"
        );
    }

    #[test]
    fn test_default_format_is_not_written() {
        let v = Value::from(TimeDelta::seconds(3723));
        assert_eq!(render(&v), "duration_from(\"01:02:03.000\")");
    }

    #[test]
    fn test_format_override_is_written() {
        let d = DurationArray::new(ArrayD::from_elem(IxDyn(&[1, 2]), TimeDelta::minutes(-90)))
            .with_format("mm:ss");
        assert_eq!(
            render(&Value::from(d)),
            "duration_from([\"-01:30:00.000\" \"-01:30:00.000\"], format=\"mm:ss\")"
        );
    }

    #[test]
    fn test_rendering_leaves_input_untouched() {
        let d = DurationArray::new(ArrayD::from_elem(IxDyn(&[1, 1]), TimeDelta::seconds(1)))
            .with_format("s");
        let before = d.clone();
        let _ = render(&Value::from(d.clone()));
        assert_eq!(d, before);
    }
}
