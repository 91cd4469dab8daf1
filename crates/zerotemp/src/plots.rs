use polecalc_core::{Vector2, numeric::make_range};
use polecalc_mesh::traversal;
use polecalc_plot::{Graph, Plotter, Series};

use crate::{
    Environment, Error, GreenCache,
    greens::{full_re_gc, im_gc0_at, im_gc0_spline, re_gc0},
    poles::{GreenPole, scan_curve, scan_plane},
};

/// Graphs of `Re Gc0`, `Im Gc0`, and the dressed `Re Gc` at `k`.
///
/// Each is sampled at `num_omega` frequencies spanning the histogram range
/// padded by one on each side, and paired with the path it is written to:
/// `output_path` with `_re`, `_im`, or `_fullRe` appended. Where the dressed
/// part is undefined it is drawn as zero.
///
/// # Errors
///
/// Returns the first error from evaluating the Green's function.
pub fn gc_graphs(
    env: &Environment,
    k: Vector2,
    num_omega: usize,
    output_path: &str,
    cache: &GreenCache,
) -> Result<Vec<(String, Graph)>, Error> {
    let (min, max) = im_gc0_spline(env, k, cache)?.range();
    let omegas = make_range(min - 1.0, max + 1.0, num_omega);

    let mut re = Vec::with_capacity(num_omega);
    let mut im = Vec::with_capacity(num_omega);
    let mut full_re = Vec::with_capacity(num_omega);
    for &omega in &omegas {
        re.push([omega, re_gc0(env, k, omega, cache)?]);
        im.push([omega, im_gc0_at(env, k, omega, cache)?]);
        let full = full_re_gc(env, k, omega, cache)?;
        full_re.push([omega, if full.is_nan() { 0.0 } else { full }]);
    }

    let parts = [
        ("_re", "re_gc0", re),
        ("_im", "im_gc0", im),
        ("_fullRe", "fullRe_gc0", full_re),
    ];
    Ok(parts
        .into_iter()
        .map(|(suffix, label, data)| {
            let path = format!("{output_path}{suffix}");
            let graph = Graph::new()
                .with_parameter("graph_filepath", path.as_str())
                .with_series(Series::new(data).with_parameter("label", label));
            (path, graph)
        })
        .collect())
}

/// Plots the three [`gc_graphs`] at `k`.
///
/// # Errors
///
/// Returns the first error from evaluating the Green's function or running
/// the plotter.
pub fn plot_gc(
    env: &Environment,
    k: Vector2,
    num_omega: usize,
    output_path: &str,
    plotter: &Plotter,
    cache: &GreenCache,
) -> Result<(), Error> {
    for (path, graph) in gc_graphs(env, k, num_omega, output_path, cache)? {
        plotter.plot(&graph, &path)?;
    }
    Ok(())
}

/// Runs [`plot_gc`] at every point of the high-symmetry path.
///
/// Each point's graphs go to `output_path` extended with its coordinates,
/// as in `out_kx_0.000000_ky_0.000000_re`.
///
/// # Errors
///
/// Stops at the first point that fails.
pub fn plot_gc_symmetry_lines(
    env: &Environment,
    points_per_line: usize,
    num_omega: usize,
    output_path: &str,
    plotter: &Plotter,
    cache: &GreenCache,
) -> Result<(), Error> {
    for k in traversal::symmetry_lines(points_per_line) {
        let path = format!("{output_path}_kx_{:.6}_ky_{:.6}", k.x, k.y);
        plot_gc(env, k, num_omega, &path, plotter, cache)?;
    }
    Ok(())
}

/// Scatter graph of the k-points at which poles were found.
#[must_use]
pub fn pole_graph(poles: &[GreenPole], output_path: &str, dimensions: Option<[f64; 2]>) -> Graph {
    let data = poles.iter().map(|pole| [pole.k.x, pole.k.y]).collect();
    let mut graph = Graph::new().with_parameter("graph_filepath", output_path);
    if let Some(dimensions) = dimensions {
        graph.set_parameter("dimensions", dimensions.to_vec());
    }
    graph.with_series(
        Series::new(data)
            .with_parameter("label", "poles")
            .with_parameter("style", "k."),
    )
}

/// Scans the third quadrant for poles and plots where they lie.
///
/// Returns the poles found.
///
/// # Errors
///
/// Returns an error if the scan or the plotter fails.
pub fn plot_pole_plane(
    env: &Environment,
    output_path: &str,
    points_per_side: u32,
    plotter: &Plotter,
    cache: &GreenCache,
) -> Result<Vec<GreenPole>, Error> {
    let poles = scan_plane(env, points_per_side, cache)?;
    plotter.plot(&pole_graph(&poles, output_path, Some([32.0, 32.0])), output_path)?;
    Ok(poles)
}

/// Scans `curve` for poles and plots where they lie.
///
/// Returns the poles found.
///
/// # Errors
///
/// Returns an error if the scan or the plotter fails.
pub fn plot_pole_curve<C>(
    env: &Environment,
    curve: C,
    num_points: usize,
    output_path: &str,
    plotter: &Plotter,
    cache: &GreenCache,
) -> Result<Vec<GreenPole>, Error>
where
    C: Fn(f64) -> Vector2,
{
    let poles = scan_curve(env, curve, num_points, cache)?;
    plotter.plot(&pole_graph(&poles, output_path, None), output_path)?;
    Ok(poles)
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn env() -> Environment {
        let mut env = Environment {
            grid_length: 6,
            num_procs: 2,
            im_gc0_bins: 24,
            re_gc0_points: 32,
            re_gc0_dw: 1e-3,
            init_d1: 0.05,
            init_mu: -0.2,
            init_f0: 0.1,
            alpha: -1,
            t: 0.2,
            t0: 1.0,
            tz: 0.1,
            thp: 0.1,
            x: 0.1,
            delta_s: 0.1,
            cs: 0.1,
            superconducting: true,
            ..Environment::default()
        };
        env.initialize();
        env
    }

    #[test]
    fn pole_graph_layout() {
        let poles = [
            GreenPole {
                k: Vector2::new(-1.0, -2.0),
                omega: 0.1,
            },
            GreenPole {
                k: Vector2::new(-0.5, -0.5),
                omega: -0.1,
            },
        ];
        let graph = pole_graph(&poles, "out/poles", Some([32.0, 32.0]));
        let graph = serde_json::to_value(graph).unwrap();
        assert_eq!(
            graph,
            json!({
                "graph_filepath": "out/poles",
                "dimensions": [32.0, 32.0],
                "series": [{
                    "label": "poles",
                    "style": "k.",
                    "data": [[-1.0, -2.0], [-0.5, -0.5]],
                }],
            })
        );

        let graph = serde_json::to_value(pole_graph(&[], "out/curve", None)).unwrap();
        assert_eq!(graph.get("dimensions"), None);
        assert_eq!(graph["series"][0]["data"], json!([]));
    }

    #[test]
    fn gc_graphs_cover_padded_range() {
        let env = env();
        let cache = GreenCache::new();
        let k = Vector2::new(-1.0, -2.0);
        let graphs = gc_graphs(&env, k, 9, "out/gc", &cache).unwrap();
        let (min, _) = im_gc0_spline(&env, k, &cache).unwrap().range();

        let paths: Vec<&str> = graphs.iter().map(|(path, _)| path.as_str()).collect();
        assert_eq!(paths, ["out/gc_re", "out/gc_im", "out/gc_fullRe"]);

        for (path, graph) in &graphs {
            let graph = serde_json::to_value(graph).unwrap();
            assert_eq!(graph["graph_filepath"], Value::from(path.as_str()));
            let data = graph["series"][0]["data"].as_array().unwrap();
            assert_eq!(data.len(), 9);
            assert_eq!(data[0][0].as_f64().unwrap(), min - 1.0);
            for point in data {
                assert!(point[1].as_f64().unwrap().is_finite());
            }
        }
        // The padded ends lie outside the histogram.
        let im = serde_json::to_value(&graphs[1].1).unwrap();
        assert_eq!(im["series"][0]["data"][8][1], json!(0.0));
    }

    #[cfg(unix)]
    #[test]
    fn plot_gc_runs_plotter_per_graph() {
        let env = env();
        let cache = GreenCache::new();
        let base = std::env::temp_dir().join(format!("polecalc-gc-{}", std::process::id()));
        let base = base.to_str().unwrap();

        let plotter = Plotter::new("true", Vec::<String>::new());
        plot_gc(&env, Vector2::new(-1.0, -2.0), 5, base, &plotter, &cache).unwrap();
        for suffix in ["_re", "_im", "_fullRe"] {
            let path = format!("{base}{suffix}");
            let json = std::fs::read_to_string(&path).unwrap();
            let written: Value = serde_json::from_str(&json).unwrap();
            assert_eq!(written["series"][0]["data"].as_array().unwrap().len(), 5);
            std::fs::remove_file(path).unwrap();
        }
    }

    #[test]
    fn plotter_failure_surfaces() {
        let env = env();
        let cache = GreenCache::new();
        let path = std::env::temp_dir().join(format!("polecalc-gc-missing-{}", std::process::id()));
        let base = path.to_str().unwrap();
        let plotter = Plotter::new("polecalc-no-such-plotter", Vec::<String>::new());
        let error = plot_gc(&env, Vector2::new(-1.0, -2.0), 3, base, &plotter, &cache).unwrap_err();
        assert!(matches!(error, Error::Plot(_)), "{error}");
        std::fs::remove_file(format!("{base}_re")).unwrap();
    }
}
