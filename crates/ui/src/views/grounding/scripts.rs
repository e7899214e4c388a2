pub(super) const ROOT_ID: &str = "grounding-root";

pub(super) const MESSAGE_ACTIVE: &str = "active";
pub(super) const MESSAGE_INACTIVE: &str = "inactive";

/// Forwards window focus and page visibility changes over `dioxus.send`.
///
/// Only changes are sent, so a blur followed by a hidden page reports once.
pub(super) fn lifecycle_subscribe_script() -> String {
    format!(
        r#"(function() {{
                    const state = window.__groundingLifecycle || (window.__groundingLifecycle = {{
                        detach: null,
                        last: null,
                    }});
                    if (state.detach) {{
                        state.detach();
                    }}
                    const report = (value) => {{
                        if (state.last === value) return;
                        state.last = value;
                        dioxus.send(value);
                    }};
                    const onVisibility = () => report(document.hidden ? {inactive:?} : {active:?});
                    const onBlur = () => report({inactive:?});
                    const onFocus = () => report({active:?});
                    document.addEventListener("visibilitychange", onVisibility);
                    window.addEventListener("blur", onBlur);
                    window.addEventListener("focus", onFocus);
                    state.last = document.hidden ? {inactive:?} : {active:?};
                    state.detach = () => {{
                        document.removeEventListener("visibilitychange", onVisibility);
                        window.removeEventListener("blur", onBlur);
                        window.removeEventListener("focus", onFocus);
                        state.detach = null;
                        state.last = null;
                    }};
                }})();"#,
        active = MESSAGE_ACTIVE,
        inactive = MESSAGE_INACTIVE,
    )
}

pub(super) const LIFECYCLE_DETACH_SCRIPT: &str = r"(function() {
                    const state = window.__groundingLifecycle;
                    if (state && state.detach) {
                        state.detach();
                    }
                })();";

pub(super) fn focus_root_script() -> String {
    format!("document.getElementById({ROOT_ID:?})?.focus();")
}
