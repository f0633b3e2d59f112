// src/graphics/tests.rs

#[cfg(test)]
mod graphics_tests {
    use crate::color::{named, Channel};
    use crate::config::{Config, RenderMode};
    use crate::error::{GraphicsError, MatrixError, StackError};
    use crate::graphics::{
        ArcMode, DrawCommand, GraphicsContext, RecordingSurface, ShapeMode, StrokeCap, StrokeJoin,
        StyleFlags, Surface,
    };
    use crate::math::{approx_eq, HALF_PI};
    use crate::matrix::{Affine3D, AnyMatrix, Matrix};
    use test_log::test;

    const EPS: f32 = 1e-4;

    fn context_with(mode: RenderMode, capacity: usize) -> GraphicsContext<RecordingSurface> {
        let mut config = Config::default();
        config.surface.mode = mode;
        config.transform.stack_capacity = capacity;
        let surface = RecordingSurface::new(config.surface.width, config.surface.height);
        GraphicsContext::new(surface, &config)
    }

    fn flat() -> GraphicsContext<RecordingSurface> {
        context_with(RenderMode::Flat, 32)
    }

    /// Clears the recording so a test only sees what it draws itself.
    fn drain(ctx: &mut GraphicsContext<RecordingSurface>) -> Vec<DrawCommand> {
        ctx.surface_mut().take_commands()
    }

    fn assert_point(actual: [f32; 2], expected: [f32; 2]) {
        assert!(
            approx_eq(actual[0], expected[0], EPS) && approx_eq(actual[1], expected[1], EPS),
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn construction_pushes_initial_style() {
        let mut ctx = flat();
        let commands = drain(&mut ctx);
        assert_eq!(
            commands[0],
            DrawCommand::Fill {
                color: named::WHITE,
                rgba: [1.0, 1.0, 1.0, 1.0]
            }
        );
        assert_eq!(
            commands[1],
            DrawCommand::Stroke {
                color: named::BLACK,
                rgba: [0.0, 0.0, 0.0, 1.0]
            }
        );
        assert_eq!(commands[2], DrawCommand::StrokeWeight { weight: 1.0 });
        assert_eq!(
            commands[3],
            DrawCommand::StrokeStyle {
                join: StrokeJoin::Miter,
                cap: StrokeCap::Round
            }
        );
        assert_eq!(commands.len(), 4);
        assert_eq!(ctx.style_flags(), StyleFlags::DO_FILL | StyleFlags::DO_STROKE);
        assert_eq!((ctx.width(), ctx.height()), (100, 100));
    }

    #[test]
    fn color_writes_reach_surface_once() {
        let mut ctx = flat();
        drain(&mut ctx);

        ctx.fill(named::RED);
        ctx.fill_color_mut().set_channel_int(Channel::Green, 255);
        ctx.stroke_color_mut().set_channel_float(Channel::Alpha, 0.5);

        let commands = drain(&mut ctx);
        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[0], DrawCommand::Fill { color: 0xFFFF0000, .. }));
        assert!(matches!(commands[1], DrawCommand::Fill { color: 0xFFFFFF00, .. }));
        assert!(matches!(commands[2], DrawCommand::Stroke { color: 0x7F000000, .. }));
        assert!(ctx.stroke_color().has_alpha());
    }

    #[test]
    fn non_paint_colors_stay_local() {
        let mut ctx = flat();
        drain(&mut ctx);
        ctx.tint(named::TEAL);
        ctx.ambient(named::NAVY);
        ctx.specular(named::SILVER);
        ctx.emissive(named::MAROON);
        ctx.shininess(4.0);
        assert!(drain(&mut ctx).is_empty());
        assert_eq!(ctx.tint_color().packed(), named::TEAL);
        assert_eq!(ctx.ambient_color().packed(), named::NAVY);
        assert_eq!(ctx.specular_color().packed(), named::SILVER);
        assert_eq!(ctx.emissive_color().packed(), named::MAROON);
        assert_eq!(ctx.get_shininess(), 4.0);
        assert!(ctx.style_flags().contains(StyleFlags::DO_TINT));
        ctx.no_tint();
        assert!(!ctx.style_flags().contains(StyleFlags::DO_TINT));
    }

    #[test]
    fn translate_then_rotate_maps_in_local_frame() {
        let mut ctx = flat();
        ctx.translate(10.0, 0.0);
        ctx.rotate(HALF_PI);
        assert_point(ctx.screen_point(1.0, 0.0), [10.0, 1.0]);
        assert!(approx_eq(ctx.screen_x(1.0, 0.0), 10.0, EPS));
        assert!(approx_eq(ctx.screen_y(1.0, 0.0), 1.0, EPS));
    }

    #[test]
    fn push_scale_pop_restores_transform() {
        let mut ctx = flat();
        ctx.push_matrix().unwrap();
        ctx.scale(2.0);
        assert_point(ctx.screen_point(1.0, 1.0), [2.0, 2.0]);
        ctx.pop_matrix().unwrap();
        assert_point(ctx.screen_point(1.0, 1.0), [1.0, 1.0]);
        assert_eq!(ctx.matrix_depth(), 0);
    }

    #[test]
    fn stack_overflow_and_underflow_are_distinct_errors() {
        let mut ctx = context_with(RenderMode::Flat, 3);
        for _ in 0..3 {
            ctx.push_matrix().unwrap();
        }
        assert_eq!(
            ctx.push_matrix(),
            Err(GraphicsError::Stack(StackError::Overflow { capacity: 3 }))
        );
        assert_eq!(ctx.matrix_depth(), 3);

        for _ in 0..3 {
            ctx.pop_matrix().unwrap();
        }
        assert_eq!(ctx.pop_matrix(), Err(GraphicsError::Stack(StackError::Underflow)));
    }

    #[test]
    fn flat_mode_rejects_spatial_operations() {
        let mut ctx = flat();
        ctx.translate(5.0, 5.0);
        let before = ctx.get_matrix();

        let err = ctx.rotate_x(0.5).unwrap_err();
        assert_eq!(err, GraphicsError::Matrix(MatrixError::Unsupported2D { op: "rotateX" }));
        assert!(ctx.translate_3d(1.0, 2.0, 3.0).is_err());
        assert!(ctx.scale_3d(1.0, 2.0, 3.0).is_err());
        assert!(ctx.rotate_axis(0.5, 0.0, 0.0, 1.0).is_err());
        assert_eq!(
            ctx.apply_matrix(&AnyMatrix::Spatial(Affine3D::IDENTITY)),
            Err(GraphicsError::Matrix(MatrixError::DimensionMismatch { op: "apply" }))
        );
        assert_eq!(ctx.get_matrix(), before, "rejected calls do not mutate");
    }

    #[test]
    fn spatial_mode_accepts_spatial_operations() {
        let mut ctx = context_with(RenderMode::Spatial, 32);
        ctx.translate_3d(1.0, 2.0, 3.0).unwrap();
        ctx.rotate_axis(HALF_PI, 0.0, 0.0, 1.0).unwrap();
        ctx.scale_3d(2.0, 2.0, 2.0).unwrap();
        assert!(ctx.get_matrix().is_3d());
        // (1, 0) -> scale (2, 0) -> rotate (0, 2) -> translate (1, 4)
        assert_point(ctx.screen_point(1.0, 0.0), [1.0, 4.0]);
    }

    #[test]
    fn spatial_projection_divides_by_w() {
        let mut ctx = context_with(RenderMode::Spatial, 32);
        let m = Affine3D::from_rows([
            [1.0, 0.0, 0.0, 4.0],
            [0.0, 1.0, 0.0, 6.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 2.0],
        ]);
        ctx.set_matrix(&AnyMatrix::Spatial(m)).unwrap();
        assert_point(ctx.screen_point(2.0, 2.0), [3.0, 4.0]);
    }

    #[test]
    fn model_point_inverts_screen_point() {
        let mut ctx = flat();
        ctx.translate(20.0, 10.0);
        ctx.rotate(0.3);
        ctx.scale_xy(2.0, 3.0);
        let [sx, sy] = ctx.screen_point(4.0, -1.0);
        let back = ctx.model_point(sx, sy).unwrap();
        assert!(approx_eq(back.x, 4.0, EPS) && approx_eq(back.y, -1.0, EPS));

        ctx.scale(0.0);
        assert_eq!(
            ctx.model_point(sx, sy),
            Err(GraphicsError::Matrix(MatrixError::Singular))
        );
    }

    #[test]
    fn begin_frame_rolls_mouse_and_resets_matrix() {
        let mut ctx = flat();
        ctx.mouse_moved(30.0, 40.0);
        ctx.begin_frame();
        ctx.mouse_moved(50.0, 60.0);
        ctx.begin_frame();
        assert_eq!((ctx.pmouse_x(), ctx.pmouse_y()), (30.0, 40.0));
        assert_eq!((ctx.mouse_x(), ctx.mouse_y()), (50.0, 60.0));

        ctx.translate(10.0, 10.0);
        ctx.push_matrix().unwrap();
        let local = ctx.model_mouse().unwrap();
        assert_eq!((local.x, local.y), (40.0, 50.0));

        ctx.begin_frame();
        assert_eq!(ctx.matrix_depth(), 0);
        assert_eq!(ctx.get_matrix(), AnyMatrix::default());
    }

    #[test]
    fn rect_is_transformed_and_styled() {
        let mut ctx = flat();
        drain(&mut ctx);
        ctx.translate(5.0, 5.0);
        ctx.rect(0.0, 0.0, 10.0, 20.0);
        let expected = vec![[5.0, 5.0], [15.0, 5.0], [15.0, 25.0], [5.0, 25.0]];
        assert_eq!(
            drain(&mut ctx),
            vec![
                DrawCommand::FillPolygon {
                    points: expected.clone()
                },
                DrawCommand::StrokePolyline {
                    points: expected,
                    closed: true
                },
            ]
        );

        ctx.rect_mode(ShapeMode::Center);
        ctx.no_fill();
        ctx.rect(0.0, 0.0, 2.0, 2.0);
        let commands = drain(&mut ctx);
        assert_eq!(commands.len(), 1);
        assert!(matches!(&commands[0], DrawCommand::StrokePolyline { points, .. } if points[0] == [4.0, 4.0]));
    }

    #[test]
    fn zero_stroke_weight_disables_stroke() {
        let mut ctx = flat();
        ctx.stroke_weight(0.0);
        assert!(!ctx.style_flags().contains(StyleFlags::DO_STROKE));
        drain(&mut ctx);

        ctx.line(0.0, 0.0, 10.0, 10.0);
        ctx.point(3.0, 3.0);
        ctx.ellipse(50.0, 50.0, 10.0, 10.0);
        let commands = drain(&mut ctx);
        assert_eq!(commands.len(), 1, "only the ellipse fill is drawn");
        assert!(matches!(&commands[0], DrawCommand::FillPolygon { points } if points.len() == 32));

        ctx.stroke_weight(2.5);
        assert!(ctx.style_flags().contains(StyleFlags::DO_STROKE));
        assert_eq!(ctx.get_stroke_weight(), 2.5);
    }

    #[test]
    fn point_is_a_tiny_stroked_segment() {
        let mut ctx = flat();
        drain(&mut ctx);
        ctx.point(3.0, 4.0);
        match &drain(&mut ctx)[..] {
            [DrawCommand::StrokePolyline { points, closed: false }] => {
                assert_eq!(points.len(), 2);
                assert_point(points[0], [3.0, 4.0]);
                assert_point(points[1], [3.0, 4.0]);
            }
            other => panic!("unexpected commands {:?}", other),
        }
    }

    #[test]
    fn arc_modes_close_differently() {
        let mut ctx = flat();
        drain(&mut ctx);

        ctx.arc(0.0, 0.0, 20.0, 20.0, 0.0, HALF_PI);
        let default = drain(&mut ctx);
        let (fill, stroke) = match &default[..] {
            [DrawCommand::FillPolygon { points: f }, DrawCommand::StrokePolyline { points: s, closed: false }] => {
                (f.clone(), s.clone())
            }
            other => panic!("unexpected commands {:?}", other),
        };
        assert_eq!(fill.len(), stroke.len() + 1, "pie fill adds the center");
        assert_eq!(*fill.last().unwrap(), [0.0, 0.0]);

        ctx.arc_with_mode(0.0, 0.0, 20.0, 20.0, 0.0, HALF_PI, ArcMode::Chord);
        assert!(matches!(
            &drain(&mut ctx)[..],
            [DrawCommand::FillPolygon { .. }, DrawCommand::StrokePolyline { closed: true, .. }]
        ));

        ctx.arc_with_mode(0.0, 0.0, 20.0, 20.0, 1.0, 0.5, ArcMode::Pie);
        assert!(drain(&mut ctx).is_empty(), "reversed arc draws nothing");
    }

    #[test]
    fn background_and_clear_ignore_transform() {
        let mut ctx = flat();
        drain(&mut ctx);
        ctx.scale(3.0);
        ctx.background(named::OLIVE);
        ctx.clear();
        assert_eq!(
            drain(&mut ctx),
            vec![
                DrawCommand::Clear { color: named::OLIVE },
                DrawCommand::Clear { color: named::BLANK },
            ]
        );
        assert_eq!(ctx.background_color().packed(), named::OLIVE);
        assert_eq!(ctx.fill_color().packed(), named::WHITE, "fill untouched by background");
    }

    #[test]
    fn stroke_style_changes_are_forwarded() {
        let mut ctx = flat();
        drain(&mut ctx);
        ctx.stroke_join(StrokeJoin::Bevel);
        ctx.stroke_cap(StrokeCap::Square);
        assert_eq!(
            drain(&mut ctx),
            vec![
                DrawCommand::StrokeStyle {
                    join: StrokeJoin::Bevel,
                    cap: StrokeCap::Round
                },
                DrawCommand::StrokeStyle {
                    join: StrokeJoin::Bevel,
                    cap: StrokeCap::Square
                },
            ]
        );
    }

    #[test]
    fn apply_and_set_matrix_in_flat_mode() {
        let mut ctx = flat();
        ctx.apply_matrix_2d(1.0, 0.0, 7.0, 0.0, 1.0, -3.0);
        assert_point(ctx.screen_point(0.0, 0.0), [7.0, -3.0]);

        let mut planar = Affine3D::IDENTITY;
        planar.translate(1.0, 2.0);
        ctx.set_matrix(&AnyMatrix::Spatial(planar)).unwrap();
        assert!(!ctx.get_matrix().is_3d(), "flat context stays flat");
        assert_point(ctx.screen_point(0.0, 0.0), [1.0, 2.0]);

        let mut warped = Affine3D::IDENTITY;
        warped.rotate_x(0.5);
        assert_eq!(
            ctx.set_matrix(&AnyMatrix::Spatial(warped)),
            Err(GraphicsError::Matrix(MatrixError::NotAffine2D))
        );
    }

    #[test]
    fn surface_access_alternates_shared_and_exclusive() {
        let mut ctx = flat();
        drain(&mut ctx);
        ctx.line(0.0, 0.0, 1.0, 1.0);
        let recorded = ctx.surface().commands().len();
        assert_eq!(recorded, 1);

        // Exclusive access needs `&mut ctx`, so no shared borrow can be alive here.
        ctx.surface_mut().clear(named::BLACK);
        let surface = ctx.surface();
        assert_eq!(surface.commands().len(), recorded + 1);
        assert_eq!(
            surface.commands().last(),
            Some(&DrawCommand::Clear { color: named::BLACK })
        );
    }
}
