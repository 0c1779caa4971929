use solunar::{lunation, solar_term, CivilDateTime, JulianDate};

fn main() -> Result<(), solunar::CalendarError> {
    let noon = CivilDateTime::new(2025, 1, 1, 12, 0, 0.0)?;
    let jd = JulianDate::from_civil(&noon);
    println!("{noon} -> {jd}");

    let equinox = solar_term::find_crossing(2025, 0.0)?;
    println!(
        "Vernal equinox 2025: {} (residual {:.2e} deg, {} iterations)",
        equinox.time.to_civil(),
        equinox.residual_deg,
        equinox.iterations
    );

    for moon in lunation::new_moons_in_year(2025)? {
        println!("New moon (lunation {:>4}): {}", moon.lunation, moon.civil);
    }
    Ok(())
}
