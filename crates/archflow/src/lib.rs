#![forbid(unsafe_code)]

//! `archflow` renders animated cloud-architecture diagrams, headless.
//!
//! Diagrams are declarative data (services, connections, groups, legend);
//! geometry and playback are pure and clock-free, so the same pipeline runs
//! in servers, CLIs and tests without a browser or a timer thread.
//!
//! # Features
//!
//! - `render`: enable scene composition + SVG output (`archflow::render`)

pub use archflow_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use archflow_render::{
        ActivationMode, EdgeLine, GroupBox, LegendEntry, NodeBox, Scene, SceneOptions, SvgOptions,
        build_scene, sanitize_svg_id, write_svg,
    };

    use archflow_core::playback::{Playback, PlaybackOptions};
    use std::time::Instant;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Load(#[from] archflow_core::Error),
        #[error(transparent)]
        Render(#[from] archflow_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Synchronous SVG render helper (executor-free). `state` is `None` for
    /// a static snapshot.
    pub fn render_svg_sync(
        definition: &archflow_core::ArchitectureDefinition,
        state: Option<&archflow_core::PlaybackState>,
        scene_options: &SceneOptions,
        svg_options: &SvgOptions,
    ) -> Result<String> {
        Ok(archflow_render::render_svg(
            definition,
            state,
            scene_options,
            svg_options,
        )?)
    }

    pub async fn render_svg(
        definition: &archflow_core::ArchitectureDefinition,
        state: Option<&archflow_core::PlaybackState>,
        scene_options: &SceneOptions,
        svg_options: &SvgOptions,
    ) -> Result<String> {
        render_svg_sync(definition, state, scene_options, svg_options)
    }

    /// Convenience wrapper bundling an [`Engine`](archflow_core::Engine) and
    /// common options, for hosts where passing four parameters per call is
    /// noisy. All work is CPU-bound; no I/O.
    #[derive(Debug, Clone)]
    pub struct DiagramRenderer {
        pub engine: archflow_core::Engine,
        pub load: archflow_core::LoadOptions,
        pub scene: SceneOptions,
        pub svg: SvgOptions,
    }

    impl Default for DiagramRenderer {
        fn default() -> Self {
            Self {
                engine: archflow_core::Engine::new(),
                load: archflow_core::LoadOptions::default(),
                scene: SceneOptions::default(),
                svg: SvgOptions::default(),
            }
        }
    }

    impl DiagramRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_activation(mut self, activation: ActivationMode) -> Self {
            self.scene.activation = activation;
            self
        }

        /// Renders a catalog entry by id.
        pub fn render_architecture_sync(&self, id: &str) -> Result<String> {
            let definition = self.engine.architecture(id)?;
            render_svg_sync(definition, None, &self.scene, &self.svg)
        }

        /// Loads a definition from text and renders it.
        pub fn render_definition_sync(&self, text: &str) -> Result<String> {
            let definition = self.engine.load_definition_sync(text, self.load)?;
            render_svg_sync(&definition, None, &self.scene, &self.svg)
        }

        pub fn scene_for(
            &self,
            definition: &archflow_core::ArchitectureDefinition,
            state: Option<&archflow_core::PlaybackState>,
        ) -> Scene {
            build_scene(definition, state, &self.scene)
        }

        /// Renders one SVG frame per animation step by driving the playback
        /// machine over synthetic deadlines. Staged activation is used so
        /// each frame highlights its own step.
        pub fn render_frames_sync(
            &self,
            definition: &archflow_core::ArchitectureDefinition,
        ) -> Result<Vec<String>> {
            let total_steps = definition.total_steps();
            let scene_options = SceneOptions {
                activation: ActivationMode::Staged,
            };

            if total_steps == 0 {
                let scene = build_scene(definition, None, &scene_options);
                return Ok(vec![write_svg(&scene, &self.svg)?]);
            }

            let mut playback = Playback::new(PlaybackOptions {
                total_steps,
                ..PlaybackOptions::default()
            });
            let start = Instant::now();
            playback.play(start);

            let mut frames = Vec::with_capacity(total_steps);
            loop {
                let state = playback.state();
                let scene = build_scene(definition, Some(&state), &scene_options);
                frames.push(write_svg(&scene, &self.svg)?);
                match playback.next_deadline() {
                    Some(deadline) => {
                        playback.poll(deadline);
                        if !playback.state().is_playing {
                            break;
                        }
                    }
                    None => break,
                }
            }
            Ok(frames)
        }
    }
}
