// Copyright (c) 2025 Steven Rosenthal smr@dt3.org
// See LICENSE file in root directory for license terms.

use clap::Parser;
use env_logger;
use log::{info, warn};

use plate_coords::angle_format::{format_dec, format_ra};
use plate_coords::astro_util::{hours_to_degrees, ra_degrees_to_minutes};
use plate_coords::coordinate_service::{compute_decimal_coordinates,
                                       compute_for_pointer_event};
use plate_coords::grid_interpolation::GridInterpolation;
use plate_coords::interpolation_gateway::InterpolationGateway;
use plate_coords::pixel_mapper::{BoundingRect, ImageGeometry,
                                 MappingOptions, PointerEvent};
use plate_coords::plate_solution::PlateSolutionRecord;
use plate_coords::ruler::measure_between_points;

/// Test program for looking up sky coordinates on a plate-solved image.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about=None)]
struct Args {
    /// Comma-separated RA grid, degrees.
    #[arg(long)]
    ra_matrix: String,

    /// Comma-separated Dec grid, degrees.
    #[arg(long)]
    dec_matrix: String,

    /// Comma-separated x0,y0,x1,y1 of the fitted region.
    #[arg(long, default_value = "0,0,1824,1824")]
    matrix_rect: String,

    /// Grid step, solver space pixels.
    #[arg(long)]
    matrix_delta: f64,

    /// Displayed image width, pixels.
    #[arg(long)]
    rendered_width: f64,

    /// Displayed image height, pixels. Defaults to the rendered width.
    #[arg(long)]
    rendered_height: Option<f64>,

    /// Intrinsic image width, pixels.
    #[arg(long)]
    natural_width: Option<f64>,

    /// Position of the image's top-left corner in client coordinates.
    #[arg(long, default_value_t = 0.0)]
    left: f64,
    #[arg(long, default_value_t = 0.0)]
    top: f64,

    /// Pointer position; client coordinates with --client, otherwise
    /// relative to the image.
    #[arg(short, long, allow_negative_numbers = true)]
    x: f64,
    #[arg(short, long, allow_negative_numbers = true)]
    y: f64,

    /// Treat --x/--y as client coordinates.
    #[arg(long, default_value_t = false)]
    client: bool,

    /// Explicit rendered/reference scale.
    #[arg(long)]
    scale: Option<f64>,

    /// Second point (image relative) for a ruler measurement.
    #[arg(long, allow_negative_numbers = true)]
    to_x: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    to_y: Option<f64>,
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let record = PlateSolutionRecord {
        ra_matrix: Some(args.ra_matrix),
        dec_matrix: Some(args.dec_matrix),
        matrix_rect: Some(args.matrix_rect),
        matrix_delta: Some(args.matrix_delta),
    };
    let gateway = InterpolationGateway::<GridInterpolation>::new(&record);
    if !gateway.has_solution() {
        warn!("Plate solution is not usable (run with RUST_LOG=debug for \
               details)");
        return;
    }

    let geometry = ImageGeometry {
        rect: BoundingRect::from_size(
            args.left, args.top, args.rendered_width,
            args.rendered_height.unwrap_or(args.rendered_width)),
        rendered_width: args.rendered_width,
        natural_width: args.natural_width,
    };
    let options = MappingOptions {
        use_client_coords: args.client,
        natural_width_override: None,
        explicit_scale: args.scale,
    };
    let (offset_x, offset_y) = if args.client {
        (args.x - args.left, args.y - args.top)
    } else {
        (args.x, args.y)
    };
    let event = PointerEvent {
        client_x: args.left + offset_x,
        client_y: args.top + offset_y,
        offset_x,
        offset_y,
    };

    match compute_for_pointer_event(&event, Some(&geometry), &gateway,
                                    &options) {
        Ok(Some(result)) => {
            let c = &result.coordinates;
            info!("At {},{}:", result.x, result.y);
            info!("  {}", c.ra_html);
            info!("  {}", c.dec_html);
            info!("  {}", c.galactic_ra_html);
            info!("  {}", c.galactic_dec_html);
        },
        Ok(None) => info!("No sky coordinates at {},{}", args.x, args.y),
        Err(e) => warn!("Lookup failed: {:?}", e),
    }

    if let Some(decimal) = compute_decimal_coordinates(
        offset_x, offset_y, &gateway, Some(&geometry), args.scale)
    {
        let ra_minutes = ra_degrees_to_minutes(hours_to_degrees(decimal.ra));
        info!("RA {:.6}h ({}), Dec {:.6}° ({})",
              decimal.ra, format_ra(Some(ra_minutes)),
              decimal.dec, format_dec(Some(decimal.dec)));
    }

    if let (Some(to_x), Some(to_y)) = (args.to_x, args.to_y) {
        match measure_between_points((offset_x, offset_y), (to_x, to_y),
                                     &gateway, Some(&geometry), args.scale) {
            Some(m) => info!("Distance to {},{}: {} ({:.6}°)",
                             to_x, to_y, m.label, m.distance),
            None => info!("No distance: {},{} has no sky position",
                          to_x, to_y),
        }
    }
}
