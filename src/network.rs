use itertools::Itertools;
use log::{debug, info, trace};

use crate::{
    clock::Clock,
    error::{NetworkError, Result},
    neuron::Neuron,
    params::{self, ParamsPatch, SimParams},
    random::{RandomSource, SeededSource},
    snapshot::{NetworkSnapshot, NeuronRecord, SynapseRecord},
    synapse::Synapse,
    types::{HashMap, HashSet, NeuronKey, Position, SynapseRef},
};

#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub t: f64,
    pub fired_ids: Vec<usize>,
    pub delivered_count: usize,
}

pub struct Network {
    params: SimParams,
    clock: Clock,
    neurons: Vec<Neuron>,
    synapses: Vec<Synapse>,
    key_to_id: HashMap<NeuronKey, usize>,
    incoming: HashMap<NeuronKey, Vec<SynapseRef>>,
    next_key: u64,
    rng: Box<dyn RandomSource>,
}

struct Graph {
    neurons: Vec<Neuron>,
    synapses: Vec<Synapse>,
}

impl Network {
    pub fn new(params: SimParams, rng: Box<dyn RandomSource>) -> Result<Self> {
        params::validate_sim_params(&params)?;
        info!("creating network with params {:?}", params);

        Ok(Self {
            params,
            clock: Clock::new(),
            neurons: Vec::new(),
            synapses: Vec::new(),
            key_to_id: HashMap::default(),
            incoming: HashMap::default(),
            next_key: 0,
            rng,
        })
    }

    pub fn with_seed(params: SimParams, seed: u64) -> Result<Self> {
        Self::new(params, Box::new(SeededSource::new(seed)))
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn set_params(&mut self, params: SimParams) -> Result<()> {
        params::validate_sim_params(&params)?;
        debug!("params changed to {:?}", params);
        self.params = params;
        self.clamp_potentials();
        Ok(())
    }

    /// Current simulation time in milliseconds.
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    pub fn neuron_count(&self) -> usize {
        self.neurons.len()
    }

    pub fn synapse_count(&self) -> usize {
        self.synapses.len()
    }

    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    pub fn neuron(&self, id: usize) -> Option<&Neuron> {
        self.neurons.get(id)
    }

    pub fn synapses(&self) -> &[Synapse] {
        &self.synapses
    }

    pub fn synapse(&self, syn_ref: SynapseRef) -> Option<&Synapse> {
        self.synapses
            .iter()
            .find(|synapse| synapse.syn_ref == syn_ref)
    }

    pub fn synapse_refs(&self) -> impl Iterator<Item = SynapseRef> + '_ {
        self.synapses.iter().map(|synapse| synapse.syn_ref)
    }

    pub fn endpoints(&self, syn_ref: SynapseRef) -> Option<(usize, usize)> {
        let synapse = self.synapse(syn_ref)?;
        Some((
            *self.key_to_id.get(&synapse.from)?,
            *self.key_to_id.get(&synapse.to)?,
        ))
    }

    pub fn incoming_synapses(&self, id: usize) -> Result<&[SynapseRef]> {
        let key = self.key_of(id)?;
        Ok(self
            .incoming
            .get(&key)
            .map(|refs| refs.as_slice())
            .unwrap_or(&[]))
    }

    pub fn outgoing_synapses(&self, id: usize) -> Result<Vec<SynapseRef>> {
        let key = self.key_of(id)?;
        Ok(self
            .synapses
            .iter()
            .filter(|synapse| synapse.from == key)
            .map(|synapse| synapse.syn_ref)
            .collect())
    }

    pub fn add_neuron(&mut self, position: Position) -> usize {
        let id = self.neurons.len();
        let key = self.allocate_neuron_key();
        self.neurons.push(Neuron::new(id, key, position));
        self.key_to_id.insert(key, id);
        debug!("added neuron {} at ({}, {})", id, position.x, position.y);
        id
    }

    pub fn remove_neuron(&mut self, id: usize) -> Result<()> {
        let key = self.key_of(id)?;

        let removed_refs: Vec<SynapseRef> = self
            .synapses
            .iter()
            .filter(|synapse| synapse.from == key || synapse.to == key)
            .map(|synapse| synapse.syn_ref)
            .collect();

        self.synapses
            .retain(|synapse| synapse.from != key && synapse.to != key);

        self.incoming.remove(&key);
        for refs in self.incoming.values_mut() {
            refs.retain(|syn_ref| !removed_refs.contains(syn_ref));
        }

        self.neurons.remove(id);
        self.reindex_neurons();

        debug!(
            "removed neuron {} with synapses [{}]",
            id,
            removed_refs.iter().map(|syn_ref| syn_ref.0).join(", ")
        );

        Ok(())
    }

    pub fn add_synapse(
        &mut self,
        from_id: usize,
        to_id: usize,
        strength: Option<f64>,
        delay: Option<f64>,
    ) -> Result<SynapseRef> {
        let from = self.key_of(from_id)?;
        let to = self.key_of(to_id)?;

        if from == to {
            return Err(NetworkError::SelfLoop(from_id));
        }

        let strength = match strength {
            Some(strength) => strength,
            None => 0.3 + self.rng.next_uniform() * 0.7,
        };

        let delay = match delay {
            Some(delay) => delay,
            None => 50.0 + self.rng.next_uniform() * 200.0,
        };

        params::validate_synapse_attributes(strength, delay)?;

        let syn_ref = self.allocate_synapse_ref();
        self.synapses
            .push(Synapse::new(syn_ref, from, to, strength, delay));
        self.incoming.entry(to).or_default().push(syn_ref);

        debug!(
            "added synapse {} from {} to {} (strength {:.3}, delay {:.1})",
            syn_ref.0, from_id, to_id, strength, delay
        );

        Ok(syn_ref)
    }

    pub fn remove_synapse(&mut self, syn_ref: SynapseRef) -> Result<()> {
        let index = self
            .synapses
            .iter()
            .position(|synapse| synapse.syn_ref == syn_ref)
            .ok_or(NetworkError::UnknownSynapse(syn_ref))?;

        let synapse = self.synapses.remove(index);

        if let Some(refs) = self.incoming.get_mut(&synapse.to) {
            refs.retain(|other| *other != syn_ref);
        }

        debug!("removed synapse {}", syn_ref.0);

        Ok(())
    }

    pub fn set_position(&mut self, id: usize, position: Position) -> Result<()> {
        self.neurons
            .get_mut(id)
            .ok_or(NetworkError::UnknownNeuron(id))?
            .set_position(position);
        Ok(())
    }

    pub fn set_potential(&mut self, id: usize, potential: f64) -> Result<()> {
        let params = &self.params;
        self.neurons
            .get_mut(id)
            .ok_or(NetworkError::UnknownNeuron(id))?
            .set_potential(potential, params);
        Ok(())
    }

    pub fn force_fire(&mut self, id: usize) -> Result<()> {
        let now = self.clock.now();
        let neuron = self
            .neurons
            .get_mut(id)
            .ok_or(NetworkError::UnknownNeuron(id))?;

        neuron.fire(&self.params, now);
        let key = neuron.key;

        for synapse in &mut self.synapses {
            if synapse.from == key {
                synapse.transmit(&self.params, now);
            }
        }

        trace!("neuron {} forced to fire at {}", id, now);

        Ok(())
    }

    /// `dt` is in seconds.
    pub fn step(&mut self, dt: f64) -> StepResult {
        let now = self.clock.advance(dt);

        let mut delivered_count = 0;
        for synapse in &mut self.synapses {
            synapse.decay_activity(dt);
            let delivery = synapse.deliver_due(now);
            if delivery.count == 0 {
                continue;
            }

            delivered_count += delivery.count;
            if let Some(&to_id) = self.key_to_id.get(&synapse.to) {
                self.neurons[to_id].receive(delivery.payload);
            }
        }

        let mut fired_ids = Vec::new();
        let mut fired_keys = HashSet::default();

        for neuron in &mut self.neurons {
            if neuron.update_potential(&self.params, dt, now, self.rng.as_mut()) {
                trace!("neuron {} fired at {}", neuron.id, now);
                fired_ids.push(neuron.id);
                fired_keys.insert(neuron.key);
            }
        }

        if !fired_keys.is_empty() {
            for synapse in &mut self.synapses {
                if fired_keys.contains(&synapse.from) {
                    synapse.transmit(&self.params, now);
                }
            }
        }

        StepResult {
            t: now,
            fired_ids,
            delivered_count,
        }
    }

    pub fn advance(&mut self, elapsed: f64) -> StepResult {
        self.step(elapsed * self.params.speed_multiplier)
    }

    pub fn clear(&mut self) {
        self.neurons.clear();
        self.synapses.clear();
        self.key_to_id.clear();
        self.incoming.clear();
        debug!("cleared network");
    }

    pub fn export_snapshot(&self) -> NetworkSnapshot {
        let neurons = self
            .neurons
            .iter()
            .map(|neuron| NeuronRecord {
                x: neuron.position().x,
                y: neuron.position().y,
                id: neuron.id,
            })
            .collect();

        let synapses = self
            .synapses
            .iter()
            .filter_map(|synapse| {
                Some(SynapseRecord {
                    from: *self.key_to_id.get(&synapse.from)?,
                    to: *self.key_to_id.get(&synapse.to)?,
                    strength: synapse.strength(),
                    delay: synapse.delay(),
                })
            })
            .collect();

        NetworkSnapshot {
            neurons,
            synapses,
            params: ParamsPatch::from_params(&self.params),
        }
    }

    pub fn export_json(&self) -> Result<String> {
        let json = self.export_snapshot().to_json()?;
        info!(
            "exported {} neurons and {} synapses",
            self.neurons.len(),
            self.synapses.len()
        );
        Ok(json)
    }

    pub fn import_snapshot(&mut self, snapshot: &NetworkSnapshot) -> Result<()> {
        let mut params = self.params.clone();
        snapshot.params.apply_to(&mut params);
        params::validate_sim_params(&params)?;

        let graph = self.build_graph(snapshot)?;

        self.params = params;
        self.neurons = graph.neurons;
        self.synapses = graph.synapses;
        self.reindex_neurons();
        self.rebuild_incoming();
        self.clamp_potentials();

        info!(
            "imported {} neurons and {} synapses",
            self.neurons.len(),
            self.synapses.len()
        );

        Ok(())
    }

    pub fn import_json(&mut self, json: &str) -> Result<()> {
        let snapshot = NetworkSnapshot::from_json(json)?;
        self.import_snapshot(&snapshot)
    }

    fn build_graph(&mut self, snapshot: &NetworkSnapshot) -> Result<Graph> {
        let num_neurons = snapshot.neurons.len();

        for (synapse_index, record) in snapshot.synapses.iter().enumerate() {
            for neuron_index in [record.from, record.to] {
                if neuron_index >= num_neurons {
                    return Err(NetworkError::DanglingSynapse {
                        synapse_index,
                        neuron_index,
                        num_neurons,
                    });
                }
            }

            if record.from == record.to {
                return Err(NetworkError::SelfLoop(record.from));
            }

            params::validate_synapse_attributes(record.strength, record.delay)?;
        }

        let neurons: Vec<Neuron> = snapshot
            .neurons
            .iter()
            .enumerate()
            .map(|(id, record)| {
                let key = self.allocate_neuron_key();
                Neuron::new(id, key, Position::new(record.x, record.y))
            })
            .collect();

        let synapses = snapshot
            .synapses
            .iter()
            .map(|record| {
                let syn_ref = self.allocate_synapse_ref();
                Synapse::new(
                    syn_ref,
                    neurons[record.from].key,
                    neurons[record.to].key,
                    record.strength,
                    record.delay,
                )
            })
            .collect();

        Ok(Graph { neurons, synapses })
    }

    fn key_of(&self, id: usize) -> Result<NeuronKey> {
        self.neurons
            .get(id)
            .map(|neuron| neuron.key)
            .ok_or(NetworkError::UnknownNeuron(id))
    }

    fn allocate_neuron_key(&mut self) -> NeuronKey {
        let key = NeuronKey(self.next_key);
        self.next_key += 1;
        key
    }

    fn allocate_synapse_ref(&mut self) -> SynapseRef {
        let syn_ref = SynapseRef(self.next_key);
        self.next_key += 1;
        syn_ref
    }

    fn reindex_neurons(&mut self) {
        self.key_to_id.clear();
        for (id, neuron) in self.neurons.iter_mut().enumerate() {
            neuron.id = id;
            self.key_to_id.insert(neuron.key, id);
        }
    }

    fn clamp_potentials(&mut self) {
        for neuron in &mut self.neurons {
            neuron.set_potential(neuron.potential(), &self.params);
        }
    }

    fn rebuild_incoming(&mut self) {
        self.incoming = self
            .synapses
            .iter()
            .map(|synapse| (synapse.to, synapse.syn_ref))
            .into_group_map()
            .into_iter()
            .collect();
    }
}
