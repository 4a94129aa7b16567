use web_sys::HtmlAudioElement;

#[derive(Debug)]
struct Cue {
    element: Option<HtmlAudioElement>,
}

impl Cue {
    fn load(src: &str, volume: f64) -> Self {
        let element = match HtmlAudioElement::new_with_src(src) {
            Ok(element) => {
                element.set_volume(volume);
                Some(element)
            }
            Err(err) => {
                log::warn!("could not load {}: {:?}", src, err);
                None
            }
        };
        Self { element }
    }

    fn play(&self) {
        let Some(element) = &self.element else {
            return;
        };
        element.set_current_time(0.0);
        // autoplay may be blocked until the first user gesture, the rejected promise is dropped
        if let Err(err) = element.play() {
            log::debug!("could not play {:?}: {:?}", element.src(), err);
        }
    }
}

/// Sounds played on round start and on every found pair.
#[derive(Debug)]
pub(crate) struct AudioCues {
    round_start: Cue,
    matched: Cue,
}

impl AudioCues {
    pub(crate) fn load() -> Self {
        Self {
            round_start: Cue::load("sounds/game.mp3", 0.45),
            matched: Cue::load("sounds/match.mp3", 0.5),
        }
    }

    pub(crate) fn round_started(&self) {
        self.round_start.play();
    }

    pub(crate) fn pair_matched(&self) {
        self.matched.play();
    }
}
