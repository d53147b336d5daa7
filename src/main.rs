use yew::prelude::*;

mod filtered;
mod hooks;
mod models;
mod services;

use filtered::filter_by_date_and_group_by_gate;
use hooks::{use_gerbangs, use_lalins, QueryState};
use models::LalinRecord;
use wasm_bindgen_futures::spawn_local;

const DEFAULT_TANGGAL: &str = "2023-11-01";

#[derive(Clone, Copy, PartialEq)]
enum AuthStatus {
    Authenticated,
    Unauthenticated,
}

#[function_component(App)]
fn app() -> Html {
    let auth_status = use_state(|| {
        if services::stored_token().is_some() {
            AuthStatus::Authenticated
        } else {
            AuthStatus::Unauthenticated
        }
    });

    if *auth_status == AuthStatus::Unauthenticated {
        let auth_status = auth_status.clone();
        return html! {
            <LoginScreen on_authenticated={Callback::from(move |_| auth_status.set(AuthStatus::Authenticated))} />
        };
    }

    html! {
        <div class="min-h-screen bg-slate-100">
            <Header />
            <main class="max-w-6xl mx-auto p-6 space-y-6">
                <ReportTable />
            </main>
        </div>
    }
}

#[function_component(Header)]
fn header() -> Html {
    let on_logout = Callback::from(move |_| {
        services::clear_token();
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    });

    html! {
        <header class="bg-[#173E63] h-16 flex items-center justify-between px-6 shadow-md">
            <span class="text-white text-xl font-bold tracking-tight">{"Laporan Lalu Lintas Gerbang Tol"}</span>
            <button onclick={on_logout} class="text-slate-200 text-sm font-medium px-4 py-2 rounded-lg hover:bg-white/10 transition-colors">
                {"Log Out"}
            </button>
        </header>
    }
}

#[derive(Properties, PartialEq)]
struct LoginScreenProps {
    on_authenticated: Callback<()>,
}

#[function_component(LoginScreen)]
fn login_screen(props: &LoginScreenProps) -> Html {
    let username = use_state(|| "".to_string());
    let password = use_state(|| "".to_string());
    let error = use_state(|| None::<String>);
    let loading = use_state(|| false);

    let on_submit = {
        let username = username.clone();
        let password = password.clone();
        let error = error.clone();
        let loading = loading.clone();
        let on_authenticated = props.on_authenticated.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let username_val = (*username).clone();
            let password_val = (*password).clone();
            let on_authenticated = on_authenticated.clone();

            if username_val.is_empty() || password_val.is_empty() {
                error.set(Some("Username and password are required".to_string()));
                return;
            }

            loading.set(true);
            error.set(None);

            let error_async = error.clone();
            let loading_async = loading.clone();
            spawn_local(async move {
                match services::login(&username_val, &password_val).await {
                    Ok(resp) if resp.status => {
                        if let Some(token) = resp.token.as_deref() {
                            services::store_token(token);
                        }
                        on_authenticated.emit(());
                    }
                    Ok(resp) => {
                        let msg = if resp.message.is_empty() {
                            "Login failed".to_string()
                        } else {
                            resp.message
                        };
                        error_async.set(Some(msg));
                    }
                    Err(err) => {
                        error_async.set(Some(err.to_string()));
                    }
                }
                loading_async.set(false);
            });
        })
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-slate-100">
            <div class="w-full max-w-md bg-white border border-slate-200 rounded-2xl shadow-lg p-8">
                <div class="text-center mb-6">
                    <h1 class="text-2xl font-bold text-[#173E63]">{"Sign in"}</h1>
                    <p class="text-sm text-slate-500 mt-2">{"Toll gate traffic dashboard"}</p>
                </div>

                <form class="space-y-4" onsubmit={on_submit}>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-slate-700">{"Username"}</label>
                        <input
                            type="text"
                            class="w-full px-4 py-2 bg-slate-50 border border-slate-200 rounded-lg focus:outline-none focus:ring-2 focus:ring-[#173E63]"
                            value={(*username).clone()}
                            oninput={{
                                let username = username.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    username.set(input.value());
                                })
                            }}
                        />
                    </div>
                    <div class="space-y-1">
                        <label class="text-sm font-medium text-slate-700">{"Password"}</label>
                        <input
                            type="password"
                            class="w-full px-4 py-2 bg-slate-50 border border-slate-200 rounded-lg focus:outline-none focus:ring-2 focus:ring-[#173E63]"
                            value={(*password).clone()}
                            oninput={{
                                let password = password.clone();
                                Callback::from(move |e: InputEvent| {
                                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                                    password.set(input.value());
                                })
                            }}
                        />
                    </div>

                    if let Some(msg) = &*error {
                        <div class="text-sm text-red-500">{ msg.clone() }</div>
                    }

                    <button
                        type="submit"
                        class="w-full bg-[#173E63] text-white py-2 rounded-lg font-semibold hover:opacity-90 transition-opacity"
                        disabled={*loading}
                    >
                        { if *loading { "Please wait..." } else { "Login" } }
                    </button>
                </form>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct DateFieldProps {
    value: String,
    on_change: Callback<String>,
}

#[function_component(DateField)]
fn date_field(props: &DateFieldProps) -> Html {
    let on_change = props.on_change.clone();
    html! {
        <div class="flex items-center gap-3">
            <label class="text-sm font-bold text-[#173E63]">{"Tanggal"}</label>
            <input
                type="date"
                value={props.value.clone()}
                oninput={Callback::from(move |e: InputEvent| {
                    let input: web_sys::HtmlInputElement = e.target_unchecked_into();
                    on_change.emit(input.value());
                })}
                class="bg-white border border-slate-200 rounded-lg px-3 py-2 text-sm text-[#173E63]"
            />
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct GateChartProps {
    rows: Vec<LalinRecord>,
    tanggal: String,
}

#[function_component(GateChart)]
fn gate_chart(props: &GateChartProps) -> Html {
    let gerbangs = use_gerbangs();
    let grouped = filter_by_date_and_group_by_gate(&props.rows, &props.tanggal);

    let gate_label = |gate_id: u32| -> String {
        gerbangs
            .data()
            .and_then(|resp| resp.gates().iter().find(|g| g.id == gate_id))
            .map(|g| g.nama_gerbang.clone())
            .unwrap_or_else(|| format!("Gerbang {}", gate_id))
    };

    let body = if grouped.is_empty() {
        html! { <p class="text-sm text-slate-500">{"No traffic recorded for this date."}</p> }
    } else {
        let max_total = grouped.values().map(|g| g.total()).max().unwrap_or(0).max(1);
        let width = grouped.len() * 72 + 16;
        html! {
            <svg width={width.to_string()} height="180">
                { for grouped.iter().enumerate().map(|(i, (gate_id, totals))| {
                    let bar_height = (totals.total() as f64 / max_total as f64 * 130.0).round() as i64;
                    let x = 16 + i as i64 * 72;
                    let y = 150 - bar_height;
                    html! {
                        <g key={*gate_id}>
                            <rect
                                x={x.to_string()}
                                y={y.to_string()}
                                width="48"
                                height={bar_height.to_string()}
                                rx="4"
                                fill="#173E63"
                            />
                            <text x={(x + 24).to_string()} y={(y - 6).to_string()} text-anchor="middle" font-size="10" fill="#173E63">
                                { format_amount(totals.total()) }
                            </text>
                            <text x={(x + 24).to_string()} y="168" text-anchor="middle" font-size="10" fill="#64748b">
                                { gate_label(*gate_id) }
                            </text>
                        </g>
                    }
                }) }
            </svg>
        }
    };

    html! {
        <div class="bg-white rounded-[10px] border border-slate-200 shadow-sm p-6">
            <h3 class="font-bold text-[#173E63] text-lg mb-4">{"Lalu Lintas per Gerbang"}</h3>
            <div class="overflow-x-auto">
                { body }
            </div>
        </div>
    }
}

/// Detail-modal state: open while a row is selected, closed otherwise.
#[derive(Clone, PartialEq, Default)]
struct DetailSelection(Option<LalinRecord>);

impl DetailSelection {
    fn open(row: LalinRecord) -> Self {
        DetailSelection(Some(row))
    }

    fn close() -> Self {
        DetailSelection(None)
    }

    fn row(&self) -> Option<&LalinRecord> {
        self.0.as_ref()
    }
}

#[function_component(ReportTable)]
fn report_table() -> Html {
    let tanggal = use_state(|| DEFAULT_TANGGAL.to_string());
    let selected_row = use_state(DetailSelection::default);

    let lalins = use_lalins((*tanggal).clone());

    let on_date_change = {
        let tanggal = tanggal.clone();
        Callback::from(move |value: String| tanggal.set(value))
    };

    let open_detail = {
        let selected_row = selected_row.clone();
        Callback::from(move |row: LalinRecord| selected_row.set(DetailSelection::open(row)))
    };

    let close_detail = {
        let selected_row = selected_row.clone();
        Callback::from(move |_| selected_row.set(DetailSelection::close()))
    };

    let body = match &lalins {
        QueryState::Loading => html! {
            <p class="text-sm text-slate-500">{"Loading..."}</p>
        },
        QueryState::Error(_) => html! {
            <p class="text-sm text-red-500">{"Error loading data"}</p>
        },
        QueryState::Loaded(resp) => {
            let rows = resp.records().to_vec();
            html! {
                <>
                    <GateChart rows={rows.clone()} tanggal={(*tanggal).clone()} />

                    <div class="bg-white rounded-[10px] border border-slate-200 shadow-sm overflow-hidden">
                        <div class="p-5 border-b border-slate-200">
                            <h3 class="font-bold text-[#173E63] text-lg">{"Laporan Lalin"}</h3>
                        </div>
                        <div class="overflow-x-auto">
                            <table class="w-full text-left border-collapse">
                                <thead>
                                    <tr class="bg-slate-50 text-slate-500 text-[10px] uppercase tracking-widest">
                                        <th class="px-6 py-4 font-bold">{"Tanggal"}</th>
                                        <th class="px-6 py-4 font-bold">{"Golongan"}</th>
                                        <th class="px-6 py-4 font-bold text-right">{"Tunai"}</th>
                                        <th class="px-6 py-4 font-bold text-right">{"E-Mandiri"}</th>
                                        <th class="px-6 py-4 font-bold text-right">{"E-Bri"}</th>
                                        <th class="px-6 py-4 font-bold text-right">{"E-Bni"}</th>
                                        <th class="px-6 py-4 font-bold text-right">{"E-Bca"}</th>
                                        <th class="px-6 py-4 font-bold text-right">{"E-Flo"}</th>
                                        <th class="px-6 py-4 font-bold">{"Actions"}</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-slate-100">
                                    { if rows.is_empty() {
                                        html! { <tr><td colspan="9" class="px-6 py-6 text-center text-slate-500">{"No records for this date."}</td></tr> }
                                    } else {
                                        html! {
                                            <>
                                                { for rows.iter().enumerate().map(|(idx, row)| {
                                                    let open_detail = open_detail.clone();
                                                    let row_clone = row.clone();
                                                    html! {
                                                        <tr key={idx} class="text-sm hover:bg-slate-50 transition-colors">
                                                            <td class="px-6 py-4 text-slate-500">{ row.tanggal.clone() }</td>
                                                            <td class="px-6 py-4 text-slate-700">{ row.golongan }</td>
                                                            <td class="px-6 py-4 text-right">{ format_amount(row.tunai) }</td>
                                                            <td class="px-6 py-4 text-right">{ format_amount(row.e_mandiri) }</td>
                                                            <td class="px-6 py-4 text-right">{ format_amount(row.e_bri) }</td>
                                                            <td class="px-6 py-4 text-right">{ format_amount(row.e_bni) }</td>
                                                            <td class="px-6 py-4 text-right">{ format_amount(row.e_bca) }</td>
                                                            <td class="px-6 py-4 text-right">{ format_amount(row.e_flo) }</td>
                                                            <td class="px-6 py-4">
                                                                <button
                                                                    onclick={Callback::from(move |_| open_detail.emit(row_clone.clone()))}
                                                                    class="border border-[#173E63] text-[#173E63] text-xs font-bold px-3 py-1.5 rounded-lg hover:bg-[#173E63] hover:text-white transition-colors"
                                                                >
                                                                    {"Detail"}
                                                                </button>
                                                            </td>
                                                        </tr>
                                                    }
                                                }) }
                                            </>
                                        }
                                    }}
                                </tbody>
                            </table>
                        </div>
                    </div>
                </>
            }
        }
    };

    html! {
        <div class="space-y-6">
            <DateField value={(*tanggal).clone()} on_change={on_date_change} />
            { body }
            {
                // Totals in the modal come from the selected row at render time.
                if let Some(row) = selected_row.row() {
                    html! {
                        <div class="fixed inset-0 z-50 flex items-center justify-center">
                            <div class="fixed inset-0 bg-black/30" onclick={close_detail.clone()}></div>
                            <div class="relative w-full max-w-md bg-white rounded-lg shadow-lg p-6">
                                <h2 class="text-lg font-bold text-[#173E63]">{"Detail Pembayaran"}</h2>
                                <div class="mt-4 space-y-2 text-sm text-slate-700">
                                    <p>{ format!("Total Tunai: {}", format_amount(row.tunai)) }</p>
                                    <p>{ format!("Total E-Toll: {}", format_amount(row.e_toll_total())) }</p>
                                    <p>{ format!("Total Keseluruhan: {}", format_amount(row.total())) }</p>
                                </div>
                                <div class="mt-6 flex justify-end">
                                    <button
                                        onclick={close_detail.clone()}
                                        class="border border-[#173E63] text-[#173E63] text-sm font-bold px-4 py-2 rounded-lg hover:bg-[#173E63] hover:text-white transition-colors"
                                    >
                                        {"Close"}
                                    </button>
                                </div>
                            </div>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn format_amount(value: i64) -> String {
    let is_negative = value < 0;
    let digits = value.unsigned_abs().to_string().chars().rev().collect::<Vec<char>>();
    let mut out = Vec::new();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('.');
        }
        out.push(*ch);
    }
    let formatted: String = out.into_iter().rev().collect();
    if is_negative {
        format!("-{}", formatted)
    } else {
        formatted
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amounts_use_indonesian_thousand_separators() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(950), "950");
        assert_eq!(format_amount(1500), "1.500");
        assert_eq!(format_amount(2750000), "2.750.000");
    }

    #[test]
    fn negative_amounts_keep_the_sign() {
        assert_eq!(format_amount(-1500), "-1.500");
    }

    #[test]
    fn extreme_amounts_format_without_overflow() {
        assert_eq!(format_amount(i64::MIN), "-9.223.372.036.854.775.808");
        assert_eq!(format_amount(i64::MAX), "9.223.372.036.854.775.807");
    }

    fn sample_row() -> LalinRecord {
        LalinRecord {
            id: None,
            id_cabang: 14,
            id_gerbang: 2,
            id_gardu: 1,
            tanggal: "2023-11-01".to_string(),
            golongan: 1,
            tunai: 100,
            e_mandiri: 10,
            e_bri: 0,
            e_bni: 0,
            e_bca: 0,
            e_flo: 0,
        }
    }

    #[test]
    fn opening_the_detail_captures_the_row() {
        let selection = DetailSelection::open(sample_row());
        let row = selection.row().unwrap();
        assert_eq!(row.id_gerbang, 2);
        assert_eq!(row.total(), 110);
    }

    #[test]
    fn closing_the_detail_clears_the_selection() {
        let selection = DetailSelection::close();
        assert!(selection.row().is_none());
        assert!(selection == DetailSelection::default());
    }
}
