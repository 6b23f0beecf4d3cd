use cadence_core::date::CalendarDate;
use chrono::Duration;
use chrono_humanize::HumanTime;
use comfy_table::{Attribute, Cell, Color, Row, Table};

/// Dates this close to today are highlighted.
const SOON_DAYS: i64 = 7;

pub fn display_preview(rule: &str, dates: &[CalendarDate], today: CalendarDate) {
    if dates.is_empty() {
        println!("No upcoming dates.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Date", "Weekday", "Due"]);

    for (i, date) in dates.iter().enumerate() {
        let mut row = Row::new();
        row.add_cell(Cell::new(i + 1));

        let distance = date.days_since(&today);
        let date_cell = Cell::new(date.to_string());
        row.add_cell(if distance <= SOON_DAYS {
            date_cell.fg(Color::Yellow).add_attribute(Attribute::Bold)
        } else {
            date_cell
        });

        row.add_cell(Cell::new(format!("{:?}", date.weekday())));
        row.add_cell(Cell::new(humanize_distance(distance)));
        table.add_row(row);
    }

    println!("Upcoming dates for '{rule}':");
    println!("{table}");
}

pub fn humanize_distance(days: i64) -> String {
    match days {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "yesterday".to_string(),
        _ => HumanTime::from(Duration::days(days)).to_string(),
    }
}
