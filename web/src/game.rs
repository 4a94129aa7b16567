use crate::audio::AudioCues;
use crate::ranking::RankingView;
use crate::storage::LocalStore;
use crate::utils::*;
use gloo::timers::callback::Interval;
use memora_core as game;
use web_time::Instant;
use yew::prelude::*;

/// How often the virtual clock is caught up with real time.
const DRIVER_INTERVAL_MS: u32 = 250;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Select(game::CardIndex),
    UpdateTime,
    Restart,
    ResetRanking,
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    index: game::CardIndex,
    symbol: game::Symbol,
    face_up: bool,
    matched: bool,
    callback: Callback<game::CardIndex>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    let CardProps {
        index,
        symbol,
        face_up,
        matched,
        callback,
    } = props.clone();

    let class = classes!(
        "card",
        face_up.then_some("reveal-card"),
        matched.then_some("disabled-card"),
    );
    let front_style = format!("background-image: url('images/{}.png')", symbol.name());
    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", index);
        callback.emit(index);
    });

    html! {
        <div {class} {onclick}>
            <div class="face front" style={front_style}/>
            <div class="face back"/>
        </div>
    }
}

/// Feeds real time to the controller's virtual clock as deltas.
#[derive(Debug)]
struct ClockDriver {
    started_at: Instant,
    driven_ms: u64,
}

impl ClockDriver {
    fn new() -> Self {
        Self {
            started_at: Instant::now(),
            driven_ms: 0,
        }
    }

    /// Milliseconds of real time not yet fed to the controller.
    fn take_elapsed_ms(&mut self) -> u64 {
        let now = u64::try_from(self.started_at.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.take_until(now)
    }

    fn take_until(&mut self, now_ms: u64) -> u64 {
        let delta = now_ms.saturating_sub(self.driven_ms);
        self.driven_ms = self.driven_ms.max(now_ms);
        delta
    }
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    pub player: String,
    pub difficulty: game::Difficulty,
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    controller: game::GameController<LocalStore>,
    cues: AudioCues,
    notice: Option<String>,
    clock: ClockDriver,
    _timer_interval: Interval,
}

impl GameView {
    fn create_timer(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(DRIVER_INTERVAL_MS, move || link.send_message(Msg::UpdateTime))
    }

    fn handle_events(&mut self, events: Vec<game::GameEvent>) {
        use game::GameEvent::*;

        for event in events {
            log::trace!("event: {:?}", event);
            match event {
                RoundStarted { .. } => self.cues.round_started(),
                CardMatched(..) => self.cues.pair_matched(),
                RoundWon { elapsed } => {
                    let player = self
                        .controller
                        .round()
                        .map_or(game::DEFAULT_PLAYER, |round| round.player.as_str());
                    let message = format!(
                        "Congratulations {}! You found every pair in {}.",
                        player,
                        format_clock(elapsed)
                    );
                    gloo::dialogs::alert(&message);
                    self.notice = Some(message);
                }
                RoundTimedOut => {
                    log::info!("time is up, starting over");
                    self.notice = Some("Time is up! The round starts over.".to_string());
                }
                CardRevealed(_) | CardHidden(_) | MatchFailed(..) | TickUpdated(_) => {}
            }
        }
    }

    fn status_class(&self) -> &'static str {
        use game::{RoundOutcome, RoundStatus};

        match self.controller.status() {
            RoundStatus::NotStarted => "not-started",
            RoundStatus::Active if self.controller.is_previewing() => "preview",
            RoundStatus::Active => "in-progress",
            RoundStatus::Finished(RoundOutcome::Won) => "win",
            RoundStatus::Finished(RoundOutcome::TimedOut) => "timeout",
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let seed = props.seed.unwrap_or_else(js_random_seed);
        let mut controller =
            game::GameController::new(LocalStore, game::ControllerSettings::default(), seed);

        let mut events = Vec::new();
        if let Err(err) = controller.start_round(props.difficulty, &props.player, &mut events) {
            log::error!("could not start round: {}", err);
        }

        let mut view = Self {
            controller,
            cues: AudioCues::load(),
            notice: None,
            clock: ClockDriver::new(),
            _timer_interval: GameView::create_timer(ctx),
        };
        view.handle_events(events);
        view
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let mut events = Vec::new();
        let updated = match msg {
            Select(index) => {
                log::debug!("select card: {}", index);
                let updated = self.controller.select(index, &mut events).has_update();
                if updated {
                    self.notice = None;
                }
                updated
            }
            UpdateTime => {
                let delta = self.clock.take_elapsed_ms();
                self.controller.advance(delta, &mut events);
                false
            }
            Restart => {
                if let Err(err) = self.controller.restart(&mut events) {
                    log::error!("could not restart round: {}", err);
                }
                self.notice = None;
                true
            }
            ResetRanking => {
                if gloo::dialogs::confirm("Reset the ranking? This cannot be undone.") {
                    if let Err(err) = self.controller.ranking_mut().reset() {
                        log::error!("could not reset ranking: {}", err);
                    }
                    gloo::dialogs::alert("Ranking reset.");
                    true
                } else {
                    false
                }
            }
        };

        let has_events = !events.is_empty();
        self.handle_events(events);
        updated || has_events
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let engine = self.controller.engine();
        let (player, difficulty, columns) = self.controller.round().map_or_else(
            || (ctx.props().player.clone(), ctx.props().difficulty, 4),
            |round| {
                (
                    round.player.clone(),
                    round.config.difficulty,
                    round.config.columns(),
                )
            },
        );
        let grid_style = format!("grid-template-columns: repeat({}, 1fr)", columns);
        let remaining = format_clock(self.controller.remaining());
        let ranking = self.controller.ranking();

        let cb_select = ctx.link().callback(Msg::Select);
        let cb_restart = ctx.link().callback(|_: MouseEvent| Msg::Restart);
        let cb_reset = ctx.link().callback(|_: ()| Msg::ResetRanking);

        html! {
            <div class={classes!("memora", self.status_class())}>
                <nav>
                    <span class="name">{format!("Player: {}", player)}</span>
                    <span class="level">{difficulty.name()}</span>
                    <span class="timer">{remaining}</span>
                    <button onclick={cb_restart}>{"Restart"}</button>
                </nav>
                if let Some(notice) = &self.notice {
                    <p class="notice">{notice.clone()}</p>
                }
                <div class="grid" style={grid_style}>
                    {
                        for engine.board().iter().enumerate().map(|(index, card)| html! {
                            <CardView
                                {index}
                                symbol={card.symbol}
                                face_up={self.controller.is_face_up(index)}
                                matched={card.matched}
                                callback={cb_select.clone()}
                            />
                        })
                    }
                </div>
                <RankingView
                    best_times={ranking.best_times()}
                    scores={ranking.scores()}
                    on_reset={cb_reset}
                />
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game::{ControllerSettings, Difficulty, GameController, GameEvent, MemoryStore};

    #[test]
    fn clock_driver_hands_out_each_millisecond_once() {
        let mut clock = ClockDriver::new();

        assert_eq!(clock.take_until(250), 250);
        assert_eq!(clock.take_until(600), 350);
        assert_eq!(clock.take_until(600), 0);
        // a late timestamp never rewinds what was already fed
        assert_eq!(clock.take_until(500), 0);
        assert_eq!(clock.take_until(700), 100);
    }

    #[test]
    fn uneven_driver_steps_still_tick_every_second() {
        let mut clock = ClockDriver::new();
        let mut controller =
            GameController::new(MemoryStore::new(), ControllerSettings::default(), 3);
        let mut events = Vec::new();
        controller
            .start_round(Difficulty::Easy, "Ana", &mut events)
            .unwrap();
        events.clear();

        for now in [240, 510, 760, 1010, 1260, 1490, 2030] {
            controller.advance(clock.take_until(now), &mut events);
        }

        let ticks: Vec<_> = events
            .into_iter()
            .filter(|event| matches!(event, GameEvent::TickUpdated(_)))
            .collect();
        assert_eq!(ticks, [GameEvent::TickUpdated(89), GameEvent::TickUpdated(88)]);
        assert_eq!(controller.remaining(), 88);
    }
}
