use client::LoadProgress;
use yew::{Html, Properties, function_component, html};

#[derive(Properties, PartialEq)]
pub struct LoadingProps {
    #[prop_or(LoadProgress::STARTING)]
    pub progress: LoadProgress,
}

/// Full-screen placeholder shown while the session settles.
#[function_component(Loading)]
pub fn loading(props: &LoadingProps) -> Html {
    let progress = props.progress;
    html! {
        <div class="flex flex-col items-center justify-center min-h-screen bg-base-200">
            <div class="bg-base-100 p-6 rounded-lg shadow-md flex flex-col items-center gap-3 w-72">
                <div class="text-xl font-medium">{"OT Dashboard"}</div>
                <span class="loading loading-spinner loading-md text-primary"></span>
                <progress class="progress progress-primary w-full" value={progress.percent.to_string()} max="100"></progress>
                <div class="text-sm text-base-content/70">
                    { format!("{} ({}/{})", progress.label, progress.step, progress.total) }
                </div>
            </div>
        </div>
    }
}

/// Inline spinner for sections that are fetching.
#[function_component(Spinner)]
pub fn spinner() -> Html {
    html! { <span class="loading loading-dots loading-sm"></span> }
}
