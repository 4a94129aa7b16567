use crate::utils::format_clock;
use memora_core::{BestTimes, ScoreBoard};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct RankingProps {
    pub best_times: BestTimes,
    pub scores: ScoreBoard,
    pub on_reset: Callback<()>,
}

#[function_component(RankingView)]
pub(crate) fn ranking_view(props: &RankingProps) -> Html {
    let on_reset = props.on_reset.clone();
    let onclick = Callback::from(move |_: MouseEvent| on_reset.emit(()));

    html! {
        <aside id="ranking">
            <table>
                <caption>{"Best times"}</caption>
                <tr><th>{"Position"}</th><th>{"Time"}</th></tr>
                {
                    for props.best_times.as_slice().iter().enumerate().map(|(index, &time)| html! {
                        <tr><td>{index + 1}</td><td>{format_clock(time)}</td></tr>
                    })
                }
            </table>
            <table>
                <caption>{"Scores"}</caption>
                <tr><th>{"Player"}</th><th>{"Points"}</th></tr>
                {
                    for props.scores.entries().iter().map(|entry| html! {
                        <tr><td>{entry.name.clone()}</td><td>{entry.points}</td></tr>
                    })
                }
            </table>
            <button id="reset-button" {onclick}>{"Reset ranking"}</button>
        </aside>
    }
}
