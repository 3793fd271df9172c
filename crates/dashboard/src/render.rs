//! Plain-text rendering of a [`Screen`].

use std::fmt::Write;

use fleet_core::present::detail::BusDetail;
use fleet_core::present::style::hex;
use fleet_core::present::{DashboardScreen, DetailView, MapView, Screen};

pub fn render(screen: &Screen) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_screen(&mut out, screen);
    out
}

fn write_screen(out: &mut String, screen: &Screen) -> std::fmt::Result {
    match screen {
        Screen::Loading { message } => writeln!(out, "{message}"),
        Screen::Error {
            title,
            reason,
            retry_hint,
        } => {
            writeln!(out, "{title}")?;
            writeln!(out, "  {reason}")?;
            writeln!(out, "[{retry_hint}] type `retry`")
        }
        Screen::Dashboard(dashboard) => write_dashboard(out, dashboard),
    }
}

fn write_dashboard(out: &mut String, screen: &DashboardScreen) -> std::fmt::Result {
    let summary = &screen.summary;
    writeln!(out, "== {} ==", summary.company.name)?;
    writeln!(out, "{}", summary.company.description)?;
    writeln!(out, "Last updated: {}", summary.last_updated())?;
    for stat in &summary.stats {
        writeln!(out, "  {:<20} {}", stat.title, stat.value)?;
    }

    writeln!(out)?;
    write_map(out, &screen.map)?;

    writeln!(out)?;
    writeln!(out, "Bus Lines")?;
    for (index, row) in screen.list.rows.iter().enumerate() {
        let marker = if row.highlighted { '>' } else { ' ' };
        writeln!(
            out,
            "{marker}{:>2}. {} {} [{}] {} | {} | {} | ETA {}",
            index + 1,
            row.route_number,
            row.name,
            row.status,
            row.driver,
            row.load,
            row.address,
            row.eta.as_deref().unwrap_or("N/A"),
        )?;
        if row.incident_count > 0 {
            writeln!(out, "      {} incident(s)", row.incident_count)?;
        }
    }

    writeln!(out)?;
    match &screen.detail {
        DetailView::Placeholder { title, hint } => {
            writeln!(out, "{title}")?;
            writeln!(out, "  {hint}")
        }
        DetailView::Bus(detail) => write_detail(out, detail),
    }
}

fn write_map(out: &mut String, map: &MapView) -> std::fmt::Result {
    writeln!(
        out,
        "Map centered at {:.4}, {:.4} (zoom {})",
        map.center.y(),
        map.center.x(),
        map.zoom
    )?;
    for marker in &map.buses {
        writeln!(
            out,
            "  bus {} {} at {:.4}, {:.4} {}",
            marker.bus,
            marker.route_number,
            marker.position.y(),
            marker.position.x(),
            hex(marker.color),
        )?;
    }
    for stop in &map.stops {
        let next = if stop.is_next_stop { " next" } else { "" };
        writeln!(
            out,
            "  stop {} {}{} at {:.4}, {:.4} {} {}",
            stop.route_number,
            stop.name,
            next,
            stop.position.y(),
            stop.position.x(),
            stop.tone,
            hex(stop.color),
        )?;
    }
    for route in &map.routes {
        writeln!(
            out,
            "  route {} {} stops {} opacity {}",
            route.bus,
            route.points.0.len(),
            hex(route.color),
            route.opacity,
        )?;
    }
    Ok(())
}

fn write_detail(out: &mut String, bus: &BusDetail) -> std::fmt::Result {
    writeln!(out, "{} ({}) [{}]", bus.name, bus.route_number, bus.status)?;
    writeln!(
        out,
        "  Driver: {} ({}) shift {}-{}",
        bus.driver.name, bus.driver.id, bus.driver.shift_start, bus.driver.shift_end
    )?;
    writeln!(
        out,
        "  Vehicle: {} {} ({}), fuel {}%, serviced {}",
        bus.vehicle.license_plate,
        bus.vehicle.model,
        bus.vehicle.year,
        bus.vehicle.fuel_level,
        bus.vehicle.last_maintenance
    )?;
    writeln!(
        out,
        "  Passengers: {} ({}%)",
        bus.passengers, bus.utilization
    )?;
    writeln!(
        out,
        "  Route: {} km at {} km/h, every {} min, completes {}",
        bus.distance_km,
        bus.average_speed_kmh,
        bus.frequency_minutes,
        bus.estimated_completion.as_deref().unwrap_or("N/A"),
    )?;
    writeln!(out, "  Location: {}", bus.address)?;

    writeln!(out, "  Stops:")?;
    for stop in &bus.stops {
        let next = if stop.is_next_stop { " (next)" } else { "" };
        writeln!(
            out,
            "    {}. {}{} ETA {}",
            stop.ordinal,
            stop.name,
            next,
            stop.eta.as_deref().unwrap_or("N/A"),
        )?;
    }

    if bus.incidents.is_empty() {
        return Ok(());
    }
    writeln!(out, "  Incidents:")?;
    for incident in &bus.incidents {
        writeln!(
            out,
            "    {} [{} / {}] {} (reported by {} at {})",
            incident.kind,
            incident.priority,
            incident.status,
            incident.description,
            incident.reported_by,
            incident.reported_time,
        )?;
    }
    Ok(())
}
