use padplot::*;

// Replacing the shared context is process-wide, so these tests live in their
// own binary and run as one test.
#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn one_hist(name: &str) -> (Shared<Hist1D>, PlotArray) {
        let hist = shared(Hist1D::from_contents(name, 0.0, 3.0, vec![1.0, 2.0, 1.0]));
        let mut array = PlotArray::new();
        array.push(&hist);
        (hist, array)
    }

    #[test]
    fn test_shared_and_explicit_contexts() {
        let mut context = StyleContext::default();
        context.set_style(vec![MAGENTA], vec![MarkerShape::OpenDiamond], vec![3.0], vec![], vec![]);
        context.set_mode(Mode::Presentation);

        let path = std::env::temp_dir()
            .join(format!("padplot-ctx-{}", std::process::id()))
            .join("style.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        context.to_json_file(&path).unwrap();
        let loaded = StyleContext::from_json_file(&path).unwrap();
        assert_eq!(loaded.label_size, 40.0);
        assert!(loaded.styles_enabled);

        // picked up by layouts built afterwards
        StyleContext::set_shared(loaded);
        let (hist, array) = one_hist("shared");
        let mut plot = SquarePlot::new(array, "x", "y");
        plot.render().unwrap();
        assert_eq!(hist.borrow().marker.color, MAGENTA);
        assert_eq!(hist.borrow().marker.shape, MarkerShape::OpenDiamond);

        // configuring one layout leaves the shared default alone
        let (_, array) = one_hist("local");
        let local = SquarePlot::new(array, "x", "y").with_style(vec![RED], vec![], vec![], vec![], vec![]);
        assert_eq!(local.base().style().table.lookup(0).color, RED);
        assert_eq!(StyleContext::shared().table.lookup(0).color, MAGENTA);

        // an explicit context shared by two layouts
        let explicit = Arc::new(StyleContext::default());
        let (a, array_a) = one_hist("a");
        let (b, array_b) = one_hist("b");
        let mut first = SquarePlot::new(array_a, "x", "y").with_context(Arc::clone(&explicit));
        let mut second = SquarePlot::new(array_b, "x", "y").with_context(explicit);
        let first_canvas = first.render().unwrap();
        second.render().unwrap();
        assert_eq!(first_canvas.pads[0].primitives[0].style, StyleOutcome::Disabled);
        assert_eq!(a.borrow().marker, b.borrow().marker);

        StyleContext::set_shared(StyleContext::default());
    }
}
