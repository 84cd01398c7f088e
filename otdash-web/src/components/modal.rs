use yew::{Callback, Children, Html, MouseEvent, Properties, function_component, html};

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub title: String,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Children,
}

#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    let close = props.on_close.reform(|_: MouseEvent| ());
    html! {
        <div class="modal modal-open">
            <div class="modal-box max-w-2xl">
                <div class="flex items-center justify-between mb-4">
                    <h3 class="font-bold text-lg">{ &props.title }</h3>
                    <button class="btn btn-sm btn-ghost" onclick={close.clone()}>{"✕"}</button>
                </div>
                { props.children.clone() }
            </div>
            <div class="modal-backdrop" onclick={close}></div>
        </div>
    }
}
